//! Attendance command handlers.

use std::collections::HashMap;

use tabled::Tabled;

use plantel_core::{
    Attendance, AttendanceFilter, AttendanceInput, Command as CoreCommand, CommandResult,
    Controller, EntityId,
};

use crate::cli::{AttendanceArgs, AttendanceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Present")]
    present: &'static str,
}

/// Player names by id, for table rows.
async fn player_names(controller: &Controller) -> Result<HashMap<EntityId, String>, CliError> {
    let players = controller.players().await?;
    Ok(players
        .iter()
        .map(|p| (p.id.clone(), p.display_name()))
        .collect())
}

fn row(a: &Attendance, names: &HashMap<EntityId, String>) -> AttendanceRow {
    AttendanceRow {
        id: a.id.to_string(),
        date: a.date.to_string(),
        kind: a.kind.to_string(),
        player: names
            .get(&a.player_id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", a.player_id)),
        present: output::yes_no(a.present),
    }
}

fn detail(a: &Attendance) -> String {
    [
        format!("ID:       {}", a.id),
        format!("Player:   {}", a.player_id),
        format!("Date:     {}", a.date),
        format!("Kind:     {}", a.kind),
        format!("Present:  {}", output::yes_no(a.present)),
    ]
    .join("\n")
}

async fn print_records(
    controller: &Controller,
    records: &[Attendance],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let names = if matches!(global.output, crate::cli::OutputFormat::Table) {
        player_names(controller).await?
    } else {
        HashMap::new()
    };
    let out = output::render_list(
        &global.output,
        records,
        |a| row(a, &names),
        |a| a.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_result(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    if let CommandResult::Attendance(record) = result {
        let out = output::render_single(&global.output, record, detail, |a| a.id.to_string())?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: AttendanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AttendanceCommand::List { date, kind } => {
            let filter = AttendanceFilter {
                date: util::parse_opt_date(date.as_deref(), "date")?,
                kind: kind.map(util::event_kind),
            };
            let records = controller.attendance(&filter).await?;
            print_records(controller, &records, global).await
        }

        AttendanceCommand::Player { id } => {
            let records = controller
                .player_attendance(&util::parse_id(&id, "id")?)
                .await?;
            print_records(controller, &records, global).await
        }

        AttendanceCommand::Record {
            player,
            date,
            kind,
            absent,
            from_file,
        } => {
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<AttendanceInput>(path)?
            } else {
                AttendanceInput {
                    player_id: util::parse_id(player.as_deref().unwrap_or_default(), "player")?,
                    date: util::parse_opt_date(date.as_deref(), "date")?
                        .unwrap_or_else(util::today),
                    kind: util::event_kind(kind),
                    present: !absent,
                }
            };
            let result = controller
                .execute(CoreCommand::RecordAttendance(input))
                .await?;
            output::success(global, "Attendance recorded");
            print_result(&result, global)
        }

        AttendanceCommand::Update {
            id,
            from_file,
            date,
            kind,
            present,
        } => {
            let eid = util::parse_id(&id, "id")?;
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<AttendanceInput>(path)?
            } else {
                let all = controller.attendance(&AttendanceFilter::default()).await?;
                let current = all
                    .iter()
                    .find(|a| a.id == eid)
                    .ok_or_else(|| CliError::not_found("Attendance", &id, "attendance list"))?;
                let mut input = AttendanceInput::from(current);
                if let Some(date) = util::parse_opt_date(date.as_deref(), "date")? {
                    input.date = date;
                }
                if let Some(kind) = kind {
                    input.kind = util::event_kind(kind);
                }
                if let Some(present) = present {
                    input.present = present;
                }
                input
            };
            let result = controller
                .execute(CoreCommand::UpdateAttendance { id: eid, input })
                .await?;
            output::success(global, "Attendance updated");
            print_result(&result, global)
        }
    }
}
