//! Error types for the replygate domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all replygate operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Persistence errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Host integration errors ---
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the rule persistence layer.
///
/// A `Read` or `Parse` failure means callers substitute the default rule set;
/// a `Write` failure leaves the in-memory rules authoritative. None of these
/// ever reach the decision engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read rule slot '{slot}': {reason}")]
    Read { slot: String, reason: String },

    #[error("Rule slot '{slot}' is malformed: {reason}")]
    Parse { slot: String, reason: String },

    #[error("Failed to write rule slot '{slot}': {reason}")]
    Write { slot: String, reason: String },
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Compose seam could not be located: {0}")]
    SeamUnavailable(String),

    #[error("Invalid host payload: {0}")]
    InvalidPayload(String),
}
