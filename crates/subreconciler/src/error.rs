//! Error types for the subreconciler crate.

use thiserror::Error;

/// Result type alias for request-key parsing.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Boxed error carried by the error-bearing flow decisions.
///
/// Steps surface arbitrary domain errors as values. This crate never inspects
/// a step error; it only hands it back to the caller through
/// [`FlowDecision::evaluate`](crate::FlowDecision::evaluate).
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Request-key parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The key was empty.
    #[error("empty request key")]
    EmptyKey,

    /// The key did not match `name` or `namespace/name`.
    #[error("invalid request key '{key}': expected 'name' or 'namespace/name'")]
    MalformedKey { key: String },
}
