//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and a distinct exit code per class.

use miette::Diagnostic;
use thiserror::Error;

use plantel_config::ConfigError;
use plantel_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(plantel::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Override the address with --backend or PLANTEL_BACKEND,\n\
             or use --insecure (-k) for a self-signed certificate."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("The backend did not answer in time")]
    #[diagnostic(
        code(plantel::timeout),
        help("Increase the timeout with --timeout or set `timeout` in the profile.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(plantel::not_found),
        help("Run: plantel {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Backend rejected the request: {message}")]
    #[diagnostic(code(plantel::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend error (HTTP {status}): {message}")]
    #[diagnostic(code(plantel::api_error))]
    ApiError { status: u16, message: String },

    #[error("Operation '{operation}' is not supported")]
    #[diagnostic(code(plantel::unsupported))]
    Unsupported { operation: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(plantel::internal))]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(plantel::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(plantel::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: plantel config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(plantel::config),
        help("Inspect the resolved configuration with: plantel config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(plantel::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(plantel::io))]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(plantel::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(plantel::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// `NotFound` for an id the user typed.
    pub fn not_found(resource_type: &str, identifier: impl Into<String>, list_command: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

/// List command to suggest for a core entity name.
fn list_command_for(entity: &str) -> &'static str {
    match entity {
        "Player" => "players list",
        "Equipment" => "equipment list",
        "Assignment" => "assignments list",
        "Match" => "matches list",
        "Attendance" => "attendance list",
        _ => "--help",
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::ControllerDisconnected => CliError::ConnectionFailed {
                url: "(disconnected)".into(),
                source: "Backend connection was closed".into(),
            },

            CoreError::Timeout { .. } => CliError::Timeout,

            CoreError::NotFound { entity, identifier } => CliError::NotFound {
                list_command: list_command_for(&entity).into(),
                resource_type: entity,
                identifier,
            },

            CoreError::Unsupported { operation } => CliError::Unsupported { operation },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api {
                status: 409,
                message,
            } => CliError::Conflict { message },

            CoreError::Api { status, message } => CliError::ApiError { status, message },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "see `plantel config profiles`".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_not_found_suggests_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity: "Match".into(),
            identifier: "8".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "matches list"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn backend_errors_keep_status_and_message() {
        let err = CliError::from(CoreError::Api {
            status: 422,
            message: "body.nombre: field required".into(),
        });
        assert_eq!(err.exit_code(), exit_code::GENERAL);
        assert_eq!(
            err.to_string(),
            "Backend error (HTTP 422): body.nombre: field required"
        );

        let conflict = CliError::from(CoreError::Api {
            status: 409,
            message: "already assigned".into(),
        });
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn connection_classes_have_their_own_codes() {
        let refused = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:8000/".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
        assert_eq!(
            CliError::from(CoreError::Timeout {
                timeout_secs: Some(30)
            }).exit_code(),
            exit_code::TIMEOUT
        );
    }

    #[test]
    fn config_errors_are_usage_errors() {
        let err = CliError::from(ConfigError::UnknownProfile {
            name: "ghost".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("ghost"));
    }
}
