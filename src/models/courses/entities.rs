use serde::{Deserialize, Serialize};

// 课程实体。每门课程必须且只能有一名授课教师。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
