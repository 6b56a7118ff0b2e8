use serde::{Deserialize, Serialize};

// 单项作业的报表行：以最新一次提交为权威口径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentReportItem {
    pub assignment_id: i64,
    pub title: String,
    pub latest_grade: Option<i32>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub last_submission_at: chrono::DateTime<chrono::Utc>,
}

// 学生进度报表：每个仍存在且至少有一次提交的作业一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: i64,
    pub student_name: String,
    pub assignments: Vec<AssignmentReportItem>,
}
