//! 接口错误映射
//!
//! 所有错误均以统一响应信封返回

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::types::BaseResponse;

#[derive(Debug)]
pub enum ApiError {
    /// 请求体格式错误
    Validation(String),
    /// 非 JSON 请求
    Unsupported(String),
    /// 服务内部错误（规范化失败、任务异常等）
    Internal(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unsupported(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(e) => ApiError::Unsupported(e.body_text()),
            other => ApiError::Validation(other.body_text()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::Validation(msg) => {
                tracing::debug!("请求体校验失败: {}", msg);
                msg
            }
            ApiError::Unsupported(msg) => msg,
            ApiError::Internal(e) => {
                tracing::error!("请求处理失败: {:#}", e);
                "internal server error".to_string()
            }
        };
        let body = BaseResponse::<()>::error(i32::from(status.as_u16()), msg);
        (status, body).into_response()
    }
}
