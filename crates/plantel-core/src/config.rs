// ── Runtime connection configuration ──
//
// These types describe *how* to reach the backend. They never touch
// disk: the CLI resolves profiles and hands a `ControllerConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Backend assumed when nothing else is configured.
pub const DEFAULT_BACKEND: &str = "http://localhost:8000";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for plantel_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Backend base URL (e.g. `http://localhost:8000`).
    pub url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How often to invalidate every family (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    /// Refetch subscribed queries in the background after invalidation.
    pub background_refetch: bool,
}

impl ControllerConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            refresh_interval_secs: 0,
            background_refetch: false,
        }
    }

    pub(crate) fn transport(&self) -> plantel_api::TransportConfig {
        plantel_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
