//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{
    ActiveModel as SubmissionActiveModel, Column as SubmissionColumn, Entity as Submissions,
};
use crate::errors::{EduTasksError, Result};
use crate::models::submissions::entities::Submission;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录一次作业提交
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        file_name: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            uploaded_at: Set(now),
            file_name: Set(file_name.to_string()),
            grade: Set(None),
            comment: Set(None),
            graded_at: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            EduTasksError::database_operation(format!("Create submission failed: {e}"))
        })?;

        Ok(result.into_submission())
    }

    /// 按 ID 查提交
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query submission failed: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出作业下的提交，按上传时间倒序
    ///
    /// `student_id` 有值时只返回该学生自己的提交。
    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        let mut query = Submissions::find().filter(SubmissionColumn::AssignmentId.eq(assignment_id));

        if let Some(student_id) = student_id {
            query = query.filter(SubmissionColumn::StudentId.eq(student_id));
        }

        let results = query
            .order_by_desc(SubmissionColumn::UploadedAt)
            .order_by_desc(SubmissionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query submissions failed: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 写入成绩与评语
    ///
    /// grade / comment / graded_at 始终一起覆盖，重复评分以最后一次为准。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        grade: i32,
        comment: Option<String>,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query submission failed: {e}"))
            })?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model: SubmissionActiveModel = existing.into();
        model.grade = Set(Some(grade));
        model.comment = Set(comment);
        model.graded_at = Set(Some(now));

        let result = model.update(&self.db).await.map_err(|e| {
            EduTasksError::database_operation(format!("Grade submission failed: {e}"))
        })?;

        Ok(Some(result.into_submission()))
    }
}
