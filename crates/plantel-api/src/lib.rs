// plantel-api: Async Rust client for the plantel team-management backend

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
