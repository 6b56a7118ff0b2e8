//! 存储层集成测试（内存 SQLite）

use super::SeaOrmStorage;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;

pub(crate) async fn make_storage() -> SeaOrmStorage {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;
    use std::time::Duration;

    // 内存库随连接消失，池固定为单连接
    let opt = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(opt)
        .await
        .unwrap();

    SeaOrmStorage::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        .await
        .unwrap()
}

pub(crate) async fn make_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password: "argon2-hash-placeholder".to_string(),
            role,
        })
        .await
        .unwrap()
}

pub(crate) async fn make_course(storage: &SeaOrmStorage, teacher_id: i64, name: &str) -> Course {
    storage
        .create_course(
            teacher_id,
            CreateCourseRequest {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
}

pub(crate) fn assignment_request(title: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: title.to_string(),
        description: Some("read chapter 3".to_string()),
        due_date: chrono::Utc::now() + chrono::Duration::days(7),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let storage = make_storage().await;
    let user = make_user(&storage, "alice", UserRole::Student).await;

    let by_id = storage.get_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert_eq!(by_id.role, UserRole::Student);

    let by_email = storage
        .get_user_by_email("alice@example.com")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let missing = storage.get_user_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_enrollment_rejected() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Math").await;

    storage.enroll_student(course.id, student.id).await.unwrap();
    assert!(storage.is_enrolled(student.id, course.id).await.unwrap());

    // 唯一索引拦截重复选课，已有记录保持不变
    let second = storage.enroll_student(course.id, student.id).await;
    assert!(second.is_err());

    let courses = storage.list_student_courses(student.id).await.unwrap();
    assert_eq!(courses.len(), 1);
}

#[tokio::test]
async fn test_owns_course_and_teaches_student() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "t1", UserRole::Teacher).await;
    let other = make_user(&storage, "t2", UserRole::Teacher).await;
    let student = make_user(&storage, "s1", UserRole::Student).await;
    let outsider = make_user(&storage, "s2", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Physics").await;

    assert!(storage.owns_course(teacher.id, course.id).await.unwrap());
    assert!(!storage.owns_course(other.id, course.id).await.unwrap());

    storage.enroll_student(course.id, student.id).await.unwrap();

    // 没有作业之前不构成教学关系
    assert!(!storage.teaches_student(teacher.id, student.id).await.unwrap());

    storage
        .create_assignment(course.id, teacher.id, assignment_request("hw1"), None)
        .await
        .unwrap();

    assert!(storage.teaches_student(teacher.id, student.id).await.unwrap());
    assert!(!storage.teaches_student(teacher.id, outsider.id).await.unwrap());
    assert!(!storage.teaches_student(other.id, student.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_course_cascades() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "History").await;

    storage.enroll_student(course.id, student.id).await.unwrap();
    let assignment = storage
        .create_assignment(course.id, teacher.id, assignment_request("essay"), None)
        .await
        .unwrap();
    let submission = storage
        .create_submission(assignment.id, student.id, "essay_v1.pdf")
        .await
        .unwrap();

    assert!(storage.delete_course(course.id).await.unwrap());

    assert!(storage.get_course_by_id(course.id).await.unwrap().is_none());
    assert!(storage
        .get_assignment_by_id(assignment.id)
        .await
        .unwrap()
        .is_none());
    assert!(storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .is_none());
    assert!(!storage.is_enrolled(student.id, course.id).await.unwrap());

    // 再删返回 false
    assert!(!storage.delete_course(course.id).await.unwrap());
}

#[tokio::test]
async fn test_grade_overwrites_previous_grade() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Chemistry").await;
    let assignment = storage
        .create_assignment(course.id, teacher.id, assignment_request("lab"), None)
        .await
        .unwrap();
    let submission = storage
        .create_submission(assignment.id, student.id, "lab.pdf")
        .await
        .unwrap();
    assert!(submission.grade.is_none());
    assert!(submission.graded_at.is_none());

    let first = storage
        .grade_submission(submission.id, 5, Some("redo section 2".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.grade, Some(5));
    assert_eq!(first.comment.as_deref(), Some("redo section 2"));
    assert!(first.graded_at.is_some());

    // 再次评分整体覆盖，comment 为空时一并置空
    let second = storage
        .grade_submission(submission.id, 9, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.grade, Some(9));
    assert!(second.comment.is_none());

    let missing = storage.grade_submission(9999, 10, None).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_submissions_filter_and_order() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let s1 = make_user(&storage, "s1", UserRole::Student).await;
    let s2 = make_user(&storage, "s2", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Biology").await;
    let assignment = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw"), None)
        .await
        .unwrap();

    let first = storage
        .create_submission(assignment.id, s1.id, "a.pdf")
        .await
        .unwrap();
    let second = storage
        .create_submission(assignment.id, s2.id, "b.pdf")
        .await
        .unwrap();

    let all = storage
        .list_assignment_submissions(assignment.id, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    // 最新提交在前
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);

    let own = storage
        .list_assignment_submissions(assignment.id, Some(s1.id))
        .await
        .unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, first.id);
}

#[tokio::test]
async fn test_list_assignments_owned_filter() {
    let storage = make_storage().await;
    let t1 = make_user(&storage, "t1", UserRole::Teacher).await;
    let t2 = make_user(&storage, "t2", UserRole::Teacher).await;
    let course = make_course(&storage, t1.id, "Art").await;

    storage
        .create_assignment(course.id, t1.id, assignment_request("a1"), None)
        .await
        .unwrap();
    storage
        .create_assignment(course.id, t2.id, assignment_request("a2"), None)
        .await
        .unwrap();

    let all = storage
        .list_course_assignments(course.id, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let owned = storage
        .list_course_assignments(course.id, Some(t1.id))
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].title, "a1");
}

#[tokio::test]
async fn test_report_latest_submission_wins() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Math").await;
    let a1 = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw1"), None)
        .await
        .unwrap();
    let a2 = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw2"), None)
        .await
        .unwrap();

    let first = storage
        .create_submission(a1.id, student.id, "v1.pdf")
        .await
        .unwrap();
    storage
        .create_submission(a2.id, student.id, "other.pdf")
        .await
        .unwrap();
    let latest = storage
        .create_submission(a1.id, student.id, "v2.pdf")
        .await
        .unwrap();

    // 只给旧提交打分：报表按最新提交口径，成绩应为空
    storage
        .grade_submission(first.id, 3, None)
        .await
        .unwrap()
        .unwrap();

    let report = storage.build_student_report(&student).await.unwrap();
    assert_eq!(report.student_id, student.id);
    assert_eq!(report.assignments.len(), 2);
    // 输出顺序为作业首次出现的顺序
    assert_eq!(report.assignments[0].assignment_id, a1.id);
    assert_eq!(report.assignments[1].assignment_id, a2.id);
    assert!(report.assignments[0].latest_grade.is_none());

    // 给最新提交打分后成绩进入报表
    storage
        .grade_submission(latest.id, 8, Some("good".to_string()))
        .await
        .unwrap()
        .unwrap();

    let report = storage.build_student_report(&student).await.unwrap();
    assert_eq!(report.assignments[0].latest_grade, Some(8));
}

#[tokio::test]
async fn test_report_repeat_build_is_identical() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Math").await;
    let a1 = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw1"), None)
        .await
        .unwrap();
    let a2 = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw2"), None)
        .await
        .unwrap();

    storage
        .create_submission(a1.id, student.id, "v1.pdf")
        .await
        .unwrap();
    let latest = storage
        .create_submission(a2.id, student.id, "essay.pdf")
        .await
        .unwrap();
    storage
        .grade_submission(latest.id, 7, Some("ok".to_string()))
        .await
        .unwrap()
        .unwrap();

    // 报表是纯读操作：无写入介入时重复构建结果逐字段一致
    let first = storage.build_student_report(&student).await.unwrap();
    let second = storage.build_student_report(&student).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_submission_allowed_without_enrollment() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let course = make_course(&storage, teacher.id, "Math").await;
    let assignment = storage
        .create_assignment(course.id, teacher.id, assignment_request("hw1"), None)
        .await
        .unwrap();

    // 提交不要求选课：未选课的学生照常写入并出现在列表与报表中
    assert!(!storage.is_enrolled(student.id, course.id).await.unwrap());
    let submission = storage
        .create_submission(assignment.id, student.id, "late_joiner.pdf")
        .await
        .unwrap();
    assert_eq!(submission.student_id, student.id);

    let listed = storage
        .list_assignment_submissions(assignment.id, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let report = storage.build_student_report(&student).await.unwrap();
    assert_eq!(report.assignments.len(), 1);
    assert_eq!(report.assignments[0].assignment_id, assignment.id);
}

#[tokio::test]
async fn test_report_skips_deleted_assignment() {
    let storage = make_storage().await;
    let teacher = make_user(&storage, "teacher", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let kept_course = make_course(&storage, teacher.id, "Kept").await;
    let gone_course = make_course(&storage, teacher.id, "Gone").await;
    let kept = storage
        .create_assignment(kept_course.id, teacher.id, assignment_request("kept"), None)
        .await
        .unwrap();
    let gone = storage
        .create_assignment(gone_course.id, teacher.id, assignment_request("gone"), None)
        .await
        .unwrap();

    storage
        .create_submission(kept.id, student.id, "kept.pdf")
        .await
        .unwrap();
    storage
        .create_submission(gone.id, student.id, "gone.pdf")
        .await
        .unwrap();

    storage.delete_course(gone_course.id).await.unwrap();

    let report = storage.build_student_report(&student).await.unwrap();
    assert_eq!(report.assignments.len(), 1);
    assert_eq!(report.assignments[0].assignment_id, kept.id);
}

#[tokio::test]
async fn test_guardian_links() {
    let storage = make_storage().await;
    let parent = make_user(&storage, "parent", UserRole::Parent).await;
    let child = make_user(&storage, "child", UserRole::Student).await;
    let other = make_user(&storage, "other", UserRole::Student).await;

    assert!(storage.first_child_of(parent.id).await.unwrap().is_none());

    let link = storage
        .create_guardian_link(parent.id, child.id)
        .await
        .unwrap();
    assert_eq!(link.parent_id, parent.id);
    assert_eq!(link.child_id, child.id);

    assert!(storage.is_guardian_of(parent.id, child.id).await.unwrap());
    assert!(!storage.is_guardian_of(parent.id, other.id).await.unwrap());

    storage
        .create_guardian_link(parent.id, other.id)
        .await
        .unwrap();
    // 多名子女时取最早建立的关联
    assert_eq!(
        storage.first_child_of(parent.id).await.unwrap(),
        Some(child.id)
    );
}

#[tokio::test]
async fn test_course_listing_by_role() {
    let storage = make_storage().await;
    let t1 = make_user(&storage, "t1", UserRole::Teacher).await;
    let t2 = make_user(&storage, "t2", UserRole::Teacher).await;
    let student = make_user(&storage, "student", UserRole::Student).await;
    let c1 = make_course(&storage, t1.id, "C1").await;
    let _c2 = make_course(&storage, t2.id, "C2").await;

    storage.enroll_student(c1.id, student.id).await.unwrap();

    let teacher_courses = storage.list_teacher_courses(t1.id).await.unwrap();
    assert_eq!(teacher_courses.len(), 1);
    assert_eq!(teacher_courses[0].id, c1.id);

    let student_courses = storage.list_student_courses(student.id).await.unwrap();
    assert_eq!(student_courses.len(), 1);
    assert_eq!(student_courses[0].id, c1.id);

    let all = storage.list_all_courses().await.unwrap();
    assert_eq!(all.len(), 2);
}
