//! Selling-point generation — the retry orchestrator.
//!
//! Flow per attempt: LLM call → extract JSON → validate shape.
//! Attempts are strictly sequential and reuse the same prompt. Any attempt-level
//! failure moves on to the next attempt; the first valid result wins.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::generation::extract::{extract_json, ExtractError};
use crate::generation::prompts::{build_prompt, Prompt};
use crate::generation::validation::{validate_result, ShapeError};
use crate::llm_client::{ChatModel, LlmError};
use crate::models::generation::GenerationResult;

/// Total attempts (1 initial + 2 retries).
pub const MAX_ATTEMPTS: u32 = 3;

/// How many attempts to make and how long to wait before each retry.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay before attempt `n + 1`, given the 1-based attempt `n` that just failed.
    pub backoff: fn(u32) -> Duration,
}

fn no_backoff(_failed_attempt: u32) -> Duration {
    Duration::ZERO
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff: no_backoff,
        }
    }
}

/// Why a single attempt failed. Never shown to users.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: AttemptError },
}

/// One end-to-end attempt: invoke, extract, validate.
async fn attempt(llm: &dyn ChatModel, prompt: &Prompt) -> Result<GenerationResult, AttemptError> {
    let reply = llm.complete(&prompt.system, &prompt.user).await?;
    let parsed = extract_json(&reply)?;
    Ok(validate_result(parsed)?)
}

/// Generates selling points for an already-validated description.
///
/// Runs up to `policy.max_attempts` attempts and returns the first valid result.
/// When every attempt fails, the last attempt's error is logged and returned
/// inside `GenerationError::Exhausted`.
pub async fn generate_selling_points(
    llm: &dyn ChatModel,
    description: &str,
    policy: &RetryPolicy,
) -> Result<GenerationResult, GenerationError> {
    let prompt = build_prompt(description);
    let max_attempts = policy.max_attempts.max(1);
    let preview: String = description.trim().chars().take(50).collect();

    let mut attempt_no = 1;
    loop {
        info!("[Attempt {attempt_no}] Generating for: \"{preview}\"");

        match attempt(llm, &prompt).await {
            Ok(result) => {
                info!(
                    "[Attempt {attempt_no}] Success with {} selling points",
                    result.selling_points.len()
                );
                return Ok(result);
            }
            Err(e) if attempt_no < max_attempts => {
                warn!("[Attempt {attempt_no}] Failed: {e}, retrying");
                let delay = (policy.backoff)(attempt_no);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt_no += 1;
            }
            Err(e) => {
                error!("All {max_attempts} attempts failed, last error: {e}");
                return Err(GenerationError::Exhausted {
                    attempts: attempt_no,
                    last: e,
                });
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
