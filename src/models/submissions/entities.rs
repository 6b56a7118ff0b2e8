use serde::{Deserialize, Serialize};

// 提交实体。同一 (assignment, student) 允许多条记录，
// 上传时间最新的一条是报表口径下的权威提交。
// grade / comment / graded_at 由一次评分动作同时写入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub file_name: String,
    pub grade: Option<i32>,
    pub comment: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}
