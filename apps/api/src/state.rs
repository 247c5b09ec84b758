use std::sync::Arc;

use crate::generation::generator::RetryPolicy;
use crate::llm_client::ChatModel;
use crate::rate_limit::AdmissionPolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `AI_API_KEY` is missing; generation then answers 500.
    pub llm: Option<Arc<dyn ChatModel>>,
    /// Per-caller admission gate. Default: `SlidingWindowLimiter` (5 per 60s).
    pub admission: Arc<dyn AdmissionPolicy>,
    pub retry: RetryPolicy,
}
