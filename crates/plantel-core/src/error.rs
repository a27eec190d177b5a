// ── Core error types ──
//
// User-facing errors from plantel-core. Transport failures and
// server-reported failures both arrive here through `From<plantel_api::Error>`
// and are surfaced the same way: as an explicit `Err` on the operation
// that triggered them.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// `Clone` so a failed mutation can keep its error in
/// [`MutationState::Failed`](crate::entity::MutationState::Failed).
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Not connected to the backend")]
    ControllerDisconnected,

    #[error(
        "Backend request timed out{}",
        .timeout_secs.map(|secs| format!(" after {secs}s")).unwrap_or_default()
    )]
    Timeout { timeout_secs: Option<u64> },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The backend rejected the request (4xx/5xx other than 404).
    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status reported by the backend, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<plantel_api::Error> for CoreError {
    fn from(err: plantel_api::Error) -> Self {
        match err {
            plantel_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: None }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: e.to_string(),
                    }
                }
            }
            plantel_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            plantel_api::Error::Timeout { timeout_secs } => CoreError::Timeout {
                timeout_secs: Some(timeout_secs),
            },
            plantel_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            plantel_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                entity: "Resource".into(),
                identifier: message,
            },
            plantel_api::Error::Api { status, message } => CoreError::Api { status, message },
            plantel_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn not_found_maps_from_404() {
        let err = CoreError::from(plantel_api::Error::Api {
            status: 404,
            message: "Jugador no encontrado".into(),
        });
        assert!(matches!(
            err,
            CoreError::NotFound { ref identifier, .. } if identifier == "Jugador no encontrado"
        ));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn timeout_names_the_limit_when_known() {
        let err = CoreError::from(plantel_api::Error::Timeout { timeout_secs: 15 });
        assert_eq!(err.to_string(), "Backend request timed out after 15s");
        assert_eq!(
            CoreError::Timeout { timeout_secs: None }.to_string(),
            "Backend request timed out"
        );
    }

    #[test]
    fn validation_status_is_kept() {
        let err = CoreError::from(plantel_api::Error::Api {
            status: 422,
            message: "body.nombre: field required".into(),
        });
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.to_string(),
            "Backend error (HTTP 422): body.nombre: field required"
        );
    }

    #[test]
    fn deserialization_becomes_internal() {
        let err = CoreError::from(plantel_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        });
        assert!(matches!(err, CoreError::Internal(_)));
    }
}
