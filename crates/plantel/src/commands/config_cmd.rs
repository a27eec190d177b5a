//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use plantel_core::DEFAULT_BACKEND;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config as TOML-like text, profiles sorted by name.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let Some(p) = cfg.profiles.get(name) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "backend = \"{}\"", p.backend);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn save_config(cfg: &Config) -> Result<std::path::PathBuf, CliError> {
    Ok(plantel_config::save_config(cfg)?)
}

fn parse_flag<T: std::str::FromStr>(value: &str, field: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply `key = value` to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "backend" => {
            plantel_config::parse_backend(value)?;
            profile.backend = value.to_owned();
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_flag(value, "insecure", "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_flag(value, "timeout", "a number (seconds)")?),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: backend, ca_cert, insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("plantel configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("club".into())
                .interact_text()
                .map_err(util::prompt_err)?;

            let backend: String = Input::new()
                .with_prompt("Backend URL")
                .default(DEFAULT_BACKEND.into())
                .validate_with(|raw: &String| {
                    plantel_config::parse_backend(raw)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(util::prompt_err)?;

            let insecure = Confirm::new()
                .with_prompt("Accept invalid TLS certificates?")
                .default(false)
                .interact()
                .map_err(util::prompt_err)?;

            let mut profile = Profile::new(backend);
            if insecure {
                profile.insecure = Some(true);
            }

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = save_config(&cfg)?;
            output::success(global, &format!("Configuration written to {}", path.display()));
            output::notice(global, &format!("  Active profile: {profile_name}"));
            output::notice(global, "  Test it: plantel players list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(DEFAULT_BACKEND));
            set_profile_key(profile, &key, &value)?;
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            save_config(&cfg)?;
            output::success(global, &format!("Set {key} on profile '{profile_name}'"));
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            if cfg.profiles.is_empty() {
                output::notice(global, "No profiles configured. Run: plantel config init");
                return Ok(());
            }
            let default = cfg.default_profile.as_deref().unwrap_or_default();
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let lines: Vec<String> = names
                .into_iter()
                .map(|name| {
                    let marker = if name == default { " *" } else { "" };
                    format!("{name}{marker}")
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_keys_and_values() {
        let mut profile = Profile::new(DEFAULT_BACKEND);
        set_profile_key(&mut profile, "timeout", "12").expect("timeout");
        set_profile_key(&mut profile, "insecure", "true").expect("insecure");
        set_profile_key(&mut profile, "backend", "https://club.example.org").expect("backend");
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.backend, "https://club.example.org");

        assert!(set_profile_key(&mut profile, "timeout", "soon").is_err());
        assert!(set_profile_key(&mut profile, "backend", "ftp://x").is_err());
        assert!(matches!(
            set_profile_key(&mut profile, "site", "default"),
            Err(CliError::Validation { ref field, .. }) if field == "site"
        ));
    }

    #[test]
    fn show_lists_profiles_in_order() {
        let mut cfg = Config {
            default_profile: Some("club".into()),
            ..Config::default()
        };
        cfg.profiles
            .insert("zeta".into(), Profile::new("http://z.local:8000"));
        cfg.profiles
            .insert("club".into(), Profile::new("http://localhost:8000"));
        let text = format_config(&cfg);
        let club = text.find("[profiles.club]").expect("club");
        let zeta = text.find("[profiles.zeta]").expect("zeta");
        assert!(club < zeta);
        assert!(text.starts_with("default_profile = \"club\""));
    }
}
