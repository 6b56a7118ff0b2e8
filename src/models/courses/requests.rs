use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
}

// 教师将学生加入自己的课程
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: i64,
}
