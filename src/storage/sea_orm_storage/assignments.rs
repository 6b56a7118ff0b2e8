//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as Assignments,
};
use crate::errors::{EduTasksError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::CreateAssignmentRequest;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 在课程下创建作业
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        teacher_id: i64,
        request: CreateAssignmentRequest,
        attachment_name: Option<String>,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = AssignmentActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            title: Set(request.title),
            description: Set(request.description),
            due_date: Set(request.due_date.timestamp()),
            attachment_name: Set(attachment_name),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            EduTasksError::database_operation(format!("Create assignment failed: {e}"))
        })?;

        Ok(result.into_assignment())
    }

    /// 按 ID 查作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query assignment failed: {e}"))
            })?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出课程下的作业
    ///
    /// `owned_by` 有值时只返回该教师本人发布的作业。
    pub async fn list_course_assignments_impl(
        &self,
        course_id: i64,
        owned_by: Option<i64>,
    ) -> Result<Vec<Assignment>> {
        let mut query = Assignments::find().filter(AssignmentColumn::CourseId.eq(course_id));

        if let Some(teacher_id) = owned_by {
            query = query.filter(AssignmentColumn::TeacherId.eq(teacher_id));
        }

        let results = query
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query assignments failed: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }
}
