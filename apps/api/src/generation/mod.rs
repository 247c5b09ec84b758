// Selling-point generation pipeline.
// Implements: prompt building, JSON extraction, shape validation, retrying orchestration.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod validation;
