// ── Core identity type ──
//
// EntityId is the key of every domain record. The backend has shipped
// both integer and UUID primary keys; consumers never care which.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use plantel_api::types::ResourceId;

// ── EntityId ────────────────────────────────────────────────────────

/// Canonical identifier for any plantel record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Uuid(Uuid),
}

impl EntityId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Uuid(_) => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            Self::Int(_) => None,
        }
    }

    /// Wire form for request paths and bodies.
    pub fn to_wire(&self) -> ResourceId {
        match self {
            Self::Int(n) => ResourceId::Int(*n),
            Self::Uuid(u) => ResourceId::Uuid(*u),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}

/// Error returned when a string is neither an integer nor a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid id (expected an integer or a UUID)")]
pub struct ParseEntityIdError(String);

impl FromStr for EntityId {
    type Err = ParseEntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Self::Int(n));
        }
        Uuid::parse_str(trimmed)
            .map(Self::Uuid)
            .map_err(|_| ParseEntityIdError(s.to_owned()))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<Uuid> for EntityId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<ResourceId> for EntityId {
    fn from(id: ResourceId) -> Self {
        match id {
            ResourceId::Int(n) => Self::Int(n),
            ResourceId::Uuid(u) => Self::Uuid(u),
        }
    }
}

impl From<&EntityId> for ResourceId {
    fn from(id: &EntityId) -> Self {
        id.to_wire()
    }
}
