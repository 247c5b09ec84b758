use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::generator::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Users only ever see a generic localized message; details go to the log.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad, missing or oversized input. Carries the user-facing message.
    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Provider credentials are not configured")]
    Misconfigured,

    #[error("Upstream error: {0}")]
    Upstream(#[from] GenerationError),
}

pub const MSG_EMPTY_DESCRIPTION: &str = "请输入产品描述";
pub const MSG_DESCRIPTION_TOO_LONG: &str = "产品描述不能超过500字";
const MSG_RATE_LIMITED: &str = "请求太频繁，请稍后再试";
const MSG_MISCONFIGURED: &str = "服务配置错误，请联系管理员";
const MSG_UPSTREAM: &str = "AI 生成失败，请稍后重试";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED),
            AppError::Misconfigured => {
                tracing::error!("AI_API_KEY is not set; refusing to generate");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_MISCONFIGURED)
            }
            // Already logged with the last attempt's error by the generator.
            AppError::Upstream(_) => (StatusCode::BAD_GATEWAY, MSG_UPSTREAM),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
