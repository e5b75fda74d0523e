//! 请求参数解析失败时的统一响应

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request<E>(err: E, message: String) -> Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    tracing::debug!("{}", message);
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("请求体格式错误: {err}");
    bad_request(err, message)
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数错误: {err}");
    bad_request(err, message)
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let message = format!("路径参数错误: {err}");
    bad_request(err, message)
}
