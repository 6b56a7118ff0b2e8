//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod enrollments;
mod reports;
mod submissions;
mod users;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::AppConfig;
use crate::errors::{EduTasksError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::from_connection(db).await
    }

    /// 从已建立的连接初始化存储（运行迁移）
    ///
    /// 显式、幂等的建表入口，请求处理路径不再接触 DDL。
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized");

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduTasksError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                EduTasksError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            EduTasksError::database_connection(format!("Database connection failed: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduTasksError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or .db/.sqlite file paths"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::entities::{Enrollment, Guardianship},
    reports::responses::StudentReport,
    submissions::entities::Submission,
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_owned_course(&self, course_id: i64, teacher_id: i64) -> Result<Option<Course>> {
        self.get_owned_course_impl(course_id, teacher_id).await
    }

    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_teacher_courses_impl(teacher_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn list_all_courses(&self) -> Result<Vec<Course>> {
        self.list_all_courses_impl().await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 关系图模块
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn is_enrolled(&self, student_id: i64, course_id: i64) -> Result<bool> {
        self.is_enrolled_impl(student_id, course_id).await
    }

    async fn owns_course(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        self.owns_course_impl(teacher_id, course_id).await
    }

    async fn teaches_student(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        self.teaches_student_impl(teacher_id, student_id).await
    }

    async fn create_guardian_link(&self, parent_id: i64, child_id: i64) -> Result<Guardianship> {
        self.create_guardian_link_impl(parent_id, child_id).await
    }

    async fn is_guardian_of(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.is_guardian_of_impl(parent_id, student_id).await
    }

    async fn first_child_of(&self, parent_id: i64) -> Result<Option<i64>> {
        self.first_child_of_impl(parent_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
        attachment_name: Option<String>,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, teacher_id, assignment, attachment_name)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_course_assignments(
        &self,
        course_id: i64,
        owned_by: Option<i64>,
    ) -> Result<Vec<Assignment>> {
        self.list_course_assignments_impl(course_id, owned_by).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_name: &str,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, file_name)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_assignment_submissions_impl(assignment_id, student_id)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, grade, comment)
            .await
    }

    // 报表模块
    async fn build_student_report(&self, student: &User) -> Result<StudentReport> {
        self.build_student_report_impl(student).await
    }
}
