use serde::Deserialize;

use super::entities::UserRole;

// 注册请求。role 由封闭枚举反序列化，非法角色在参数解析阶段即被拒绝。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}
