use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::entities::{Enrollment, Guardianship},
    reports::responses::StudentReport,
    submissions::entities::Submission,
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 获取某教师拥有的某课程（不存在或不属于该教师时为 None）
    async fn get_owned_course(&self, course_id: i64, teacher_id: i64) -> Result<Option<Course>>;
    // 列出教师自己的课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 列出学生已选的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 列出全部课程
    async fn list_all_courses(&self) -> Result<Vec<Course>>;
    // 删除课程：在一个事务内级联删除其选课、作业及作业的全部提交
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 关系图方法（选课 / 监护）
    // 将学生加入课程
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    // 学生是否选了某课程
    async fn is_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool>;
    // 教师是否拥有某课程
    async fn owns_course(&self, teacher_id: i64, course_id: i64) -> Result<bool>;
    // 教师是否教到某学生：存在该教师的作业，其课程下有该学生的选课记录
    async fn teaches_student(&self, teacher_id: i64, student_id: i64) -> Result<bool>;
    // 建立家长-子女监护关联
    async fn create_guardian_link(&self, parent_id: i64, child_id: i64) -> Result<Guardianship>;
    // 家长是否监护某学生
    async fn is_guardian_of(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 家长关联的第一名子女（报表 /me 的任意取first语义）
    async fn first_child_of(&self, parent_id: i64) -> Result<Option<i64>>;

    /// 作业管理方法
    // 创建作业（teacher_id 冗余写入）
    async fn create_assignment(
        &self,
        course_id: i64,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
        attachment_name: Option<String>,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程下的作业；owned_by 给定时只返回该教师的作业
    async fn list_course_assignments(
        &self,
        course_id: i64,
        owned_by: Option<i64>,
    ) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 创建提交（总是追加新行，不覆盖）
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_name: &str,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出作业下的提交（按上传时间倒序）；student_id 给定时只返回该学生的
    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>>;
    // 评分：grade/comment/graded_at 一次性写入，覆盖旧值
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 报表方法
    // 构建学生进度报表（纯读聚合）
    async fn build_student_report(&self, student: &User) -> Result<StudentReport>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
