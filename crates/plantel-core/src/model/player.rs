// ── Player domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A squad member.
///
/// `active == false` is the soft-delete marker: inactive players stay in
/// the list but are excluded from rotation and the per-match editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub surname: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub number: Option<i32>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Player {
    /// "Name Surname", or just the name when no surname is set.
    pub fn display_name(&self) -> String {
        match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {surname}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Editable player fields (the record without id and timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            surname: None,
            birth_date: None,
            position: None,
            number: None,
            active: true,
        }
    }
}

impl From<&Player> for PlayerInput {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            surname: p.surname.clone(),
            birth_date: p.birth_date,
            position: p.position.clone(),
            number: p.number,
            active: p.active,
        }
    }
}

fn default_active() -> bool {
    true
}
