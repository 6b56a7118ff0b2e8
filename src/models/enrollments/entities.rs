use serde::{Deserialize, Serialize};

// 选课关联：声明某学生是某课程的成员。
// (course_id, student_id) 全局唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

// 监护关联：声明某家长可以查看某学生的报表。
// 无基数约束，一名家长可关联多名子女。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardianship {
    pub id: i64,
    pub parent_id: i64,
    pub child_id: i64,
}
