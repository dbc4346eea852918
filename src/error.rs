//! Engine errors
//!
//! Only configuration can fail. Deaths are gameplay events, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no level with id {0}")]
    UnknownLevel(u32),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
