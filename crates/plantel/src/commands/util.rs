//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use plantel_core::{
    CommandResult, Controller, EntityController, EntityId, EquipmentKind, EventKind, MatchKind,
    Mutable, SortField,
};

use crate::cli::{EquipmentKindArg, EventKindArg, MatchKindArg, SummaryColumn};
use crate::error::CliError;

// ── Argument parsing ────────────────────────────────────────────────

/// Parse an integer or UUID identifier typed by the user.
pub fn parse_id(raw: &str, field: &str) -> Result<EntityId, CliError> {
    raw.parse::<EntityId>().map_err(|e| CliError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("invalid date '{raw}' (expected YYYY-MM-DD)"),
    })
}

pub fn parse_opt_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|d| parse_date(d, field)).transpose()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// ── Enum mapping ────────────────────────────────────────────────────

pub fn event_kind(arg: EventKindArg) -> EventKind {
    match arg {
        EventKindArg::Training => EventKind::Training,
        EventKindArg::Match => EventKind::Match,
    }
}

pub fn equipment_kind(arg: EquipmentKindArg) -> EquipmentKind {
    match arg {
        EquipmentKindArg::Ball => EquipmentKind::Ball,
        EquipmentKindArg::Bib => EquipmentKind::Bib,
        EquipmentKindArg::Water => EquipmentKind::Water,
        EquipmentKindArg::Kit => EquipmentKind::Kit,
    }
}

pub fn match_kind(arg: MatchKindArg) -> MatchKind {
    match arg {
        MatchKindArg::Match => MatchKind::Match,
        MatchKindArg::Training => MatchKind::Training,
        MatchKindArg::Friendly => MatchKind::Friendly,
        MatchKindArg::Tournament => MatchKind::Tournament,
    }
}

pub fn sort_field(column: SummaryColumn) -> SortField {
    match column {
        SummaryColumn::Matches => SortField::Matches,
        SummaryColumn::Goals => SortField::Goals,
        SummaryColumn::Assists => SortField::Assists,
        SummaryColumn::Yellow => SortField::YellowCards,
        SummaryColumn::Red => SortField::RedCards,
        SummaryColumn::Minutes => SortField::Minutes,
        SummaryColumn::AverageMinutes => SortField::AverageMinutes,
    }
}

// ── Interaction ─────────────────────────────────────────────────────

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action fails
/// instead of hanging.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Entity forms ────────────────────────────────────────────────────

/// Run one create (`existing == None`) or update through the entity
/// form dialog: open it, let `edit` fill the form, submit once.
pub async fn submit_form<R: Mutable>(
    controller: &Controller,
    existing: Option<&R::Item>,
    edit: impl FnOnce(&mut R::Input) -> Result<(), CliError>,
) -> Result<CommandResult, CliError> {
    let mut entities = EntityController::<R>::new(controller.clone());
    match existing {
        Some(item) => entities.open_edit(item),
        None => entities.open_create(),
    }
    let form = entities.form_mut().ok_or_else(|| CliError::Internal {
        message: format!("{} form did not open", R::NAME),
    })?;
    edit(form)?;
    Ok(entities.submit().await?)
}

// ── Files ───────────────────────────────────────────────────────────

/// Read and deserialize a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_integers_and_uuids() {
        assert_eq!(parse_id("12", "id").expect("int"), EntityId::Int(12));
        assert!(parse_id("550e8400-e29b-41d4-a716-446655440000", "id").is_ok());
        assert!(matches!(
            parse_id("doce", "player"),
            Err(CliError::Validation { ref field, .. }) if field == "player"
        ));
    }

    #[test]
    fn dates_are_iso() {
        assert_eq!(
            parse_date("2024-03-09", "date").expect("date"),
            NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid")
        );
        assert!(parse_date("09/03/2024", "date").is_err());
        assert_eq!(parse_opt_date(None, "date").expect("none"), None);
    }

    #[test]
    fn summary_columns_map_to_wire_fields() {
        assert_eq!(sort_field(SummaryColumn::Yellow).as_wire(), "amarillas");
        assert_eq!(
            sort_field(SummaryColumn::AverageMinutes).as_wire(),
            "promedio_minutos"
        );
    }

    #[test]
    fn confirm_with_yes_skips_prompt() {
        assert!(confirm("Delete player 3?", true).expect("auto-approved"));
    }
}
