//! Error types shared across the rendering engine.
//!
//! Mirrors the error-handling policy in spec.md §7: input validation errors
//! are surfaced to callers as-is (a boundary maps them to 400), transient
//! upstream/cache errors are expected to be absorbed by the pipeline before
//! they ever reach here, and `Invariant` is reserved for the "this can only
//! happen if a UV constant is wrong" class of bug.

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid player uuid: {0}")]
    InvalidUuid(String),

    #[error("unsupported image format: {0}")]
    InvalidFormat(String),

    #[error("scale must be >= 1, got {0}")]
    InvalidScale(i64),

    #[error("skin decode failed: {0}")]
    SkinDecode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("cache backend error: {0}")]
    Cache(String),

    #[error("operation timed out")]
    Timeout,

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
