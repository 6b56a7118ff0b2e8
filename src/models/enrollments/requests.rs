use serde::Deserialize;

// 家长将自己与一名学生建立监护关联
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGuardianLinkRequest {
    pub child_id: i64,
}
