//! User-facing error taxonomy for the viewer.
//!
//! Two failures matter to a user, and they have different remedies:
//! a sandboxed host blocking engine capabilities (reopen outside the
//! sandbox) versus a transient engine/asset failure (retry). Everything
//! after a successful load is background noise the engine heals itself.

use std::fmt;

/// Terminal initialization failures, classified for the error card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The host execution context blocks required engine capabilities.
    /// Recoverable only by running outside that context.
    Restricted { message: String },
    /// Transient engine, asset, or network failure. Worth retrying.
    EngineFailure { message: String },
}

impl ViewerError {
    /// Whether a retry affordance makes sense for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ViewerError::EngineFailure { .. })
    }

    /// One-line remedy text for the error card.
    pub fn remedy(&self) -> &'static str {
        match self {
            ViewerError::Restricted { .. } => {
                "The map engine cannot start inside this sandboxed frame. \
                 Open the page directly, outside the restricted context."
            }
            ViewerError::EngineFailure { .. } => {
                "Check the connection and retry loading the map."
            }
        }
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Restricted { message } => {
                write!(f, "blocked by the host environment: {message}")
            }
            ViewerError::EngineFailure { message } => {
                write!(f, "map engine failed to initialize: {message}")
            }
        }
    }
}

impl std::error::Error for ViewerError {}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Message fragments that identify a sandbox/security block during
/// construction.
const RESTRICTED_PATTERNS: [&str; 2] = ["Blocked a frame", "Location"];

/// Message fragments of known-benign security noise the engine emits when
/// embedded; these never indicate a real rendering failure.
const BENIGN_NOISE_PATTERNS: [&str; 3] = ["Blocked a frame", "Location", "SecurityError"];

/// Classify a construction failure message into the taxonomy.
pub fn classify_construct_failure(message: &str) -> ViewerError {
    if RESTRICTED_PATTERNS.iter().any(|p| message.contains(p)) {
        ViewerError::Restricted {
            message: message.to_string(),
        }
    } else {
        ViewerError::EngineFailure {
            message: message.to_string(),
        }
    }
}

/// Whether a runtime engine fault is known-benign security noise that
/// should be suppressed rather than surfaced.
pub fn benign_engine_noise(message: &str) -> bool {
    BENIGN_NOISE_PATTERNS.iter().any(|p| message.contains(p))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_block_classifies_as_restricted() {
        let err = classify_construct_failure("Blocked a frame with origin \"null\"");
        assert!(matches!(err, ViewerError::Restricted { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn location_access_classifies_as_restricted() {
        let err = classify_construct_failure("Cannot read Location of cross-origin frame");
        assert!(matches!(err, ViewerError::Restricted { .. }));
    }

    #[test]
    fn other_failures_classify_as_retryable_engine_failure() {
        let err = classify_construct_failure("worker script fetch failed: 502");
        assert!(matches!(err, ViewerError::EngineFailure { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn security_noise_is_benign() {
        assert!(benign_engine_noise("SecurityError: The operation is insecure"));
        assert!(benign_engine_noise("Blocked a frame with origin"));
        assert!(!benign_engine_noise("tile request failed: 404"));
    }

    #[test]
    fn remedies_differ_between_variants() {
        let restricted = ViewerError::Restricted { message: "x".into() };
        let transient = ViewerError::EngineFailure { message: "y".into() };
        assert_ne!(restricted.remedy(), transient.remedy());
    }
}
