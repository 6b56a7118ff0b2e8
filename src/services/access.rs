//! 授权判定
//!
//! 所有基于关系的访问判定集中在这里，按 UserRole 穷举匹配，
//! 新增角色时漏写分支会直接编译失败。判定只回答"能不能"，
//! 实体是否存在由调用方先行检查（先 404 后 403）。

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 能否查看某学生的进度报表
///
/// 学生只能看自己，家长看监护的子女，教师看自己教到的学生。
pub async fn can_view_student_report(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
) -> Result<bool> {
    match user.role {
        UserRole::Student => Ok(user.id == student_id),
        UserRole::Parent => storage.is_guardian_of(user.id, student_id).await,
        UserRole::Teacher => storage.teaches_student(user.id, student_id).await,
    }
}

/// 能否查看某份作业（详情 / 附件）
///
/// 教师只能看自己发布的作业，学生与家长不受限。
pub fn can_view_assignment(user: &User, assignment: &Assignment) -> bool {
    match user.role {
        UserRole::Teacher => assignment.teacher_id == user.id,
        UserRole::Student | UserRole::Parent => true,
    }
}

/// 教师是否拥有某份作业（评分 / 下载提交的前提）
pub fn owns_assignment(user: &User, assignment: &Assignment) -> bool {
    assignment.teacher_id == user.id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: format!("user{id}"),
            email: format!("u{id}@example.com"),
            password_hash: String::new(),
            role,
            created_at: chrono::Utc::now(),
        }
    }

    fn assignment(teacher_id: i64) -> Assignment {
        Assignment {
            id: 1,
            course_id: 1,
            teacher_id,
            title: "hw".to_string(),
            description: None,
            due_date: chrono::Utc::now(),
            attachment_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_teacher_sees_only_own_assignments() {
        let owner = user(1, UserRole::Teacher);
        let other = user(2, UserRole::Teacher);
        let a = assignment(1);
        assert!(can_view_assignment(&owner, &a));
        assert!(!can_view_assignment(&other, &a));
    }

    #[test]
    fn test_students_and_parents_unrestricted() {
        let a = assignment(1);
        assert!(can_view_assignment(&user(5, UserRole::Student), &a));
        assert!(can_view_assignment(&user(6, UserRole::Parent), &a));
    }

    #[test]
    fn test_owns_assignment() {
        let a = assignment(3);
        assert!(owns_assignment(&user(3, UserRole::Teacher), &a));
        assert!(!owns_assignment(&user(4, UserRole::Teacher), &a));
    }
}
