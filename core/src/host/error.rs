//! Error types for host calls

use thiserror::Error;

/// Failure of a single host query or primitive.
///
/// Neither variant is fatal. Callers go through [`super::guarded`], which turns
/// both into an absent result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The running host version does not offer this query or primitive
    #[error("host does not provide {capability}")]
    Unsupported { capability: &'static str },

    /// The host raised while servicing the call
    #[error("host call {call} failed: {reason}")]
    CallFailed { call: &'static str, reason: String },
}

impl HostError {
    pub fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    pub fn failed(call: &'static str, reason: impl Into<String>) -> Self {
        Self::CallFailed {
            call,
            reason: reason.into(),
        }
    }
}
