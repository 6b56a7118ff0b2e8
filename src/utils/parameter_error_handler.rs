//! 请求参数错误处理器
//!
//! JSON / 查询参数反序列化失败时返回统一的 ApiResponse 结构，
//! 而不是 actix 默认的纯文本 400。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid JSON payload: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::Validation,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid query parameters: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::Validation,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}
