use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

// 登录响应：访问令牌 + 用户信息
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64, // 秒
    pub user: User,
}
