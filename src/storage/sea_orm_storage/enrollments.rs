//! 关系图存储操作（选课 / 监护）
//!
//! 授权谓词都是对关联表的存在性查询。

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_students::{
    ActiveModel as CourseStudentActiveModel, Column as CourseStudentColumn,
    Entity as CourseStudents,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::parent_child::{
    ActiveModel as ParentChildActiveModel, Column as ParentChildColumn, Entity as ParentChild,
};
use crate::errors::{EduTasksError, Result};
use crate::models::enrollments::entities::{Enrollment, Guardianship};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 将学生加入课程
    ///
    /// 调用方负责重复判定；(course_id, student_id) 唯一索引兜底。
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = CourseStudentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Enroll failed: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 学生是否选了某课程
    pub async fn is_enrolled_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let count = CourseStudents::find()
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .filter(CourseStudentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query enrollment failed: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 教师是否拥有某课程
    pub async fn owns_course_impl(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        let count = Courses::find()
            .filter(CourseColumn::Id.eq(course_id))
            .filter(CourseColumn::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| EduTasksError::database_operation(format!("Query course failed: {e}")))?;

        Ok(count > 0)
    }

    /// 教师是否教到某学生
    ///
    /// 成立条件：存在一份该教师的作业，其所在课程下有该学生的选课记录。
    pub async fn teaches_student_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let course_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .select_only()
            .column(AssignmentColumn::CourseId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query assignments failed: {e}"))
            })?;

        if course_ids.is_empty() {
            return Ok(false);
        }

        let count = CourseStudents::find()
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .filter(CourseStudentColumn::CourseId.is_in(course_ids))
            .count(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query enrollment failed: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 建立家长-子女监护关联
    pub async fn create_guardian_link_impl(
        &self,
        parent_id: i64,
        child_id: i64,
    ) -> Result<Guardianship> {
        let model = ParentChildActiveModel {
            parent_id: Set(parent_id),
            child_id: Set(child_id),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            EduTasksError::database_operation(format!("Create guardian link failed: {e}"))
        })?;

        Ok(result.into_guardianship())
    }

    /// 家长是否监护某学生
    pub async fn is_guardian_of_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = ParentChild::find()
            .filter(ParentChildColumn::ParentId.eq(parent_id))
            .filter(ParentChildColumn::ChildId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query guardianship failed: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 家长关联的第一名子女
    pub async fn first_child_of_impl(&self, parent_id: i64) -> Result<Option<i64>> {
        let result = ParentChild::find()
            .filter(ParentChildColumn::ParentId.eq(parent_id))
            .order_by_asc(ParentChildColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query guardianship failed: {e}"))
            })?;

        Ok(result.map(|m| m.child_id))
    }
}
