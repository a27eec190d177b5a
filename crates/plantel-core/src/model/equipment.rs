// ── Equipment and assignment domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Equipment category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EquipmentKind {
    #[default]
    Ball,
    Bib,
    Water,
    Kit,
    Other(String),
}

impl EquipmentKind {
    /// Wire string (`PELOTA`, `PECHERA`, `AGUA`, `CONJUNTO`).
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Ball => "PELOTA",
            Self::Bib => "PECHERA",
            Self::Water => "AGUA",
            Self::Kit => "CONJUNTO",
            Self::Other(raw) => raw,
        }
    }

    /// Accepts the wire names and the English names, case-insensitively.
    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "PELOTA" | "BALL" => Self::Ball,
            "PECHERA" | "BIB" => Self::Bib,
            "AGUA" | "WATER" => Self::Water,
            "CONJUNTO" | "KIT" => Self::Kit,
            _ => Self::Other(raw.to_owned()),
        }
    }
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ball => f.write_str("ball"),
            Self::Bib => f.write_str("bib"),
            Self::Water => f.write_str("water"),
            Self::Kit => f.write_str("kit"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for EquipmentKind {
    fn from(raw: String) -> Self {
        Self::from_wire(&raw)
    }
}

impl From<EquipmentKind> for String {
    fn from(kind: EquipmentKind) -> Self {
        kind.to_string()
    }
}

/// A piece of club equipment (elemento).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub kind: EquipmentKind,
    pub quantity: i32,
    pub active: bool,
}

/// Editable equipment fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: EquipmentKind,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Default for EquipmentInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            kind: EquipmentKind::default(),
            quantity: 1,
            active: true,
        }
    }
}

impl From<&Equipment> for EquipmentInput {
    fn from(e: &Equipment) -> Self {
        Self {
            name: e.name.clone(),
            description: e.description.clone(),
            kind: e.kind.clone(),
            quantity: e.quantity,
            active: e.active,
        }
    }
}

/// Custody of one piece of equipment by one player.
///
/// `active == false` means returned. A returned assignment is history:
/// handing the item out again creates a new assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: EntityId,
    pub player_id: EntityId,
    pub equipment_id: EntityId,
    pub assigned_on: Option<NaiveDate>,
    pub active: bool,
}

/// Body for handing equipment to a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub player_id: Option<EntityId>,
    pub equipment_id: Option<EntityId>,
    #[serde(default)]
    pub assigned_on: Option<NaiveDate>,
}

fn default_quantity() -> i32 {
    1
}

fn default_active() -> bool {
    true
}
