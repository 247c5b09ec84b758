//! Axum route handlers for the Generation API.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    Json,
};
use serde::Serialize;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{AppError, MSG_DESCRIPTION_TOO_LONG, MSG_EMPTY_DESCRIPTION};
use crate::generation::generator::generate_selling_points;
use crate::models::generation::{GenerateRequest, GenerationResult, MAX_DESCRIPTION_CHARS};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: GenerationResult,
}

/// Accepts 1–500 characters after trimming; returns the trimmed description.
pub fn validate_description(description: Option<&str>) -> Result<&str, AppError> {
    let trimmed = description.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(AppError::Validation(MSG_EMPTY_DESCRIPTION));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::Validation(MSG_DESCRIPTION_TOO_LONG));
    }
    Ok(trimmed)
}

/// POST /api/generate
///
/// Rate limit → input validation → credentials check → generation pipeline.
/// Rejected inputs still count against the caller's window.
pub async fn handle_generate(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let identity = peer.ip().to_string();
    if !state.admission.admit(&identity, Instant::now()) {
        warn!("Rejected request from {identity}: rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable generate body from {identity}: {rejection}");
            GenerateRequest::default()
        }
    };
    let description = validate_description(request.description.as_deref())?;

    let llm = state.llm.as_ref().ok_or(AppError::Misconfigured)?;

    let span = info_span!("generate", request_id = %Uuid::new_v4(), client = %identity);
    let result = generate_selling_points(llm.as_ref(), description, &state.retry)
        .instrument(span)
        .await?;

    Ok(Json(GenerateResponse { result }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_descriptions_rejected() {
        for input in [None, Some(""), Some("   \n\t ")] {
            assert!(matches!(
                validate_description(input),
                Err(AppError::Validation(MSG_EMPTY_DESCRIPTION))
            ));
        }
    }

    #[test]
    fn test_length_bounds_counted_in_characters() {
        assert_eq!(validate_description(Some("a")).unwrap(), "a");

        let max = "发".repeat(MAX_DESCRIPTION_CHARS);
        assert!(validate_description(Some(&max)).is_ok());

        let too_long = "a".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert!(matches!(
            validate_description(Some(&too_long)),
            Err(AppError::Validation(MSG_DESCRIPTION_TOO_LONG))
        ));
    }

    #[test]
    fn test_length_measured_after_trimming() {
        let padded = format!("  {}  ", "a".repeat(MAX_DESCRIPTION_CHARS));
        assert_eq!(
            validate_description(Some(&padded)).unwrap().len(),
            MAX_DESCRIPTION_CHARS
        );
    }
}
