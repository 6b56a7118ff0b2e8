use serde::Deserialize;

// 创建作业请求。由 multipart 表单字段组装（附件走文件流）。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
}
