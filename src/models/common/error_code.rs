//! 业务错误码
//!
//! 与 HTTP 状态码配合使用：错误码给出比状态码更细的失败原因。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400 请求错误
    BadRequest = 4000,
    Validation = 4001,
    InvalidRole = 4002,
    FileTypeNotAllowed = 4003,
    FileSizeExceeded = 4004,
    ReportNotForTeachers = 4005,

    // 401 未认证
    Unauthorized = 4010,
    AuthFailed = 4011,

    // 403 已认证但无权限
    Forbidden = 4030,

    // 404 目标不存在（或因所有权而不可见）
    NotFound = 4040,
    UserNotFound = 4041,
    CourseNotFound = 4042,
    AssignmentNotFound = 4043,
    SubmissionNotFound = 4044,
    AttachmentNotFound = 4045,
    FileNotFound = 4046,
    NoChildLinked = 4047,
    StudentNotFound = 4048,

    // 409 冲突
    DuplicateEmail = 4090,
    DuplicateEnrollment = 4091,

    // 500 服务端错误
    InternalServerError = 5000,
    RegisterFailed = 5001,
    FileUploadFailed = 5002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 4010);
        assert_eq!(ErrorCode::Forbidden as i32, 4030);
        assert_eq!(ErrorCode::DuplicateEnrollment as i32, 4091);
        assert_eq!(ErrorCode::InternalServerError as i32, 5000);
    }
}
