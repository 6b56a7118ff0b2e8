use serde::Deserialize;

// 评分请求。重复评分覆盖之前的结果，不保留历史。
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmissionRequest {
    pub grade: i32,
    pub comment: Option<String>,
}
