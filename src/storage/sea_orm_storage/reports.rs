//! 学情报告聚合
//!
//! 对学生的全部提交按上传时间升序扫描，同一作业保留最后一次提交，
//! 输出顺序为各作业首次出现的顺序。

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{EduTasksError, Result};
use crate::models::reports::responses::{AssignmentReportItem, StudentReport};
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::User;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

/// 升序提交流中按作业取最后一次提交，保持首次出现顺序
pub(super) fn latest_by_assignment(submissions: Vec<Submission>) -> Vec<Submission> {
    let mut order: Vec<i64> = Vec::new();
    let mut latest: HashMap<i64, Submission> = HashMap::new();

    for submission in submissions {
        if !latest.contains_key(&submission.assignment_id) {
            order.push(submission.assignment_id);
        }
        latest.insert(submission.assignment_id, submission);
    }

    order
        .into_iter()
        .filter_map(|assignment_id| latest.remove(&assignment_id))
        .collect()
}

impl SeaOrmStorage {
    /// 生成单个学生的学情报告
    pub async fn build_student_report_impl(&self, student: &User) -> Result<StudentReport> {
        let submissions = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(student.id))
            .order_by_asc(SubmissionColumn::UploadedAt)
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                EduTasksError::database_operation(format!("Query submissions failed: {e}"))
            })?;

        let latest: Vec<Submission> = latest_by_assignment(
            submissions.into_iter().map(|m| m.into_submission()).collect(),
        );

        let assignment_ids: Vec<i64> = latest.iter().map(|s| s.assignment_id).collect();

        let assignments: HashMap<i64, crate::models::assignments::entities::Assignment> =
            if assignment_ids.is_empty() {
                HashMap::new()
            } else {
                Assignments::find()
                    .filter(AssignmentColumn::Id.is_in(assignment_ids))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        EduTasksError::database_operation(format!("Query assignments failed: {e}"))
                    })?
                    .into_iter()
                    .map(|m| (m.id, m.into_assignment()))
                    .collect()
            };

        // 作业已被删除的提交不进入报告
        let items: Vec<AssignmentReportItem> = latest
            .into_iter()
            .filter_map(|submission| {
                assignments
                    .get(&submission.assignment_id)
                    .map(|assignment| AssignmentReportItem {
                        assignment_id: assignment.id,
                        title: assignment.title.clone(),
                        latest_grade: submission.grade,
                        due_date: assignment.due_date,
                        last_submission_at: submission.uploaded_at,
                    })
            })
            .collect();

        Ok(StudentReport {
            student_id: student.id,
            student_name: student.name.clone(),
            assignments: items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: i64, assignment_id: i64, uploaded_at: i64, grade: Option<i32>) -> Submission {
        Submission {
            id,
            assignment_id,
            student_id: 1,
            uploaded_at: chrono::DateTime::from_timestamp(uploaded_at, 0).unwrap(),
            file_name: format!("s{id}.pdf"),
            grade,
            comment: None,
            graded_at: None,
        }
    }

    #[test]
    fn test_latest_wins_per_assignment() {
        let result = latest_by_assignment(vec![
            submission(1, 10, 100, Some(5)),
            submission(2, 10, 200, Some(8)),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
        assert_eq!(result[0].grade, Some(8));
    }

    #[test]
    fn test_order_is_first_seen() {
        let result = latest_by_assignment(vec![
            submission(1, 20, 100, None),
            submission(2, 10, 200, None),
            submission(3, 20, 300, Some(6)),
        ]);
        let ids: Vec<i64> = result.iter().map(|s| s.assignment_id).collect();
        assert_eq!(ids, vec![20, 10]);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(latest_by_assignment(vec![]).is_empty());
    }
}
