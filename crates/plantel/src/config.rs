//! CLI configuration: thin wrapper around `plantel_config` shared types.
//!
//! Adds the resolution that respects `GlobalOpts` overrides
//! (`--backend`, `--profile`, `--insecure`, `--timeout`).

use std::time::Duration;

use plantel_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use plantel_config::{Config, Defaults, Profile, config_path, load_config_or_default};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Profile named by `--profile`, else the configured default, else "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the `ControllerConfig` for this invocation.
///
/// Backend: `--backend` > selected profile > built-in default. An
/// explicit `--profile` that does not exist is an error, and so is a
/// dangling `default_profile`.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<ControllerConfig, CliError> {
    let selected = cfg.profile(global.profile.as_deref()).map_err(|e| match e {
        plantel_config::ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
            name,
            available: available_profiles(cfg),
        },
        other => other.into(),
    })?;

    let mut controller = match selected {
        Some((name, profile)) => {
            tracing::debug!(profile = name, "using profile");
            plantel_config::profile_to_controller_config(profile, &cfg.defaults)?
        }
        None => plantel_config::default_controller_config(&cfg.defaults)?,
    };

    if let Some(ref raw) = global.backend {
        controller.url = plantel_config::parse_backend(raw)?;
    }
    if global.insecure {
        controller.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        controller.timeout = Duration::from_secs(secs);
    }

    Ok(controller)
}

/// Comma-separated profile names, sorted, or "(none)".
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
