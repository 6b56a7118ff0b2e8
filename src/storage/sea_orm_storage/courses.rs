//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_students::{Column as CourseStudentColumn, Entity as CourseStudents};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{EduTasksError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        teacher_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            teacher_id: Set(teacher_id),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Create course failed: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Query course failed: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 获取某教师拥有的某课程
    pub async fn get_owned_course_impl(
        &self,
        course_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Query course failed: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出教师自己的课程
    pub async fn list_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let results = Courses::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("List courses failed: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出学生已选的课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let course_ids: Vec<i64> = CourseStudents::find()
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .select_only()
            .column(CourseStudentColumn::CourseId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query enrollments failed: {e}"))
            })?;

        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = Courses::find()
            .filter(Column::Id.is_in(course_ids))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("List courses failed: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出全部课程
    pub async fn list_all_courses_impl(&self) -> Result<Vec<Course>> {
        let results = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("List courses failed: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    /// 删除课程
    ///
    /// 级联语义在一个事务内显式执行：先删该课程作业的提交，
    /// 再删作业，再删选课记录，最后删课程行本身。
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            EduTasksError::database_operation(format!("Begin transaction failed: {e}"))
        })?;

        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .select_only()
            .column(AssignmentColumn::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query assignments failed: {e}"))
            })?;

        if !assignment_ids.is_empty() {
            Submissions::delete_many()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    EduTasksError::database_operation(format!("Delete submissions failed: {e}"))
                })?;

            Assignments::delete_many()
                .filter(AssignmentColumn::Id.is_in(assignment_ids))
                .exec(&txn)
                .await
                .map_err(|e| {
                    EduTasksError::database_operation(format!("Delete assignments failed: {e}"))
                })?;
        }

        CourseStudents::delete_many()
            .filter(CourseStudentColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Delete enrollments failed: {e}"))
            })?;

        let result = Courses::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Delete course failed: {e}")))?;

        txn.commit().await.map_err(|e| {
            EduTasksError::database_operation(format!("Commit transaction failed: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }
}
