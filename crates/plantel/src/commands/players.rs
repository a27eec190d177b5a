//! Player command handlers.

use tabled::Tabled;

use plantel_core::{CommandResult, Controller, EntityController, Player, PlayerInput, Players};

use crate::cli::{GlobalOpts, PlayersArgs, PlayersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Born")]
    birth_date: String,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl From<&Player> for PlayerRow {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.display_name(),
            position: p.position.clone().unwrap_or_else(|| "-".into()),
            number: output::opt(p.number.as_ref()),
            birth_date: output::opt(p.birth_date.as_ref()),
            active: output::yes_no(p.active),
        }
    }
}

pub(crate) fn detail(p: &Player) -> String {
    let mut lines = vec![
        format!("ID:        {}", p.id),
        format!("Name:      {}", p.display_name()),
        format!("Position:  {}", p.position.as_deref().unwrap_or("-")),
        format!("Number:    {}", output::opt(p.number.as_ref())),
        format!("Born:      {}", output::opt(p.birth_date.as_ref())),
        format!("Active:    {}", output::yes_no(p.active)),
    ];
    if let Some(created) = p.created_at {
        lines.push(format!("Created:   {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(updated) = p.updated_at {
        lines.push(format!("Updated:   {}", updated.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n")
}

fn print_player(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    if let CommandResult::Player(player) = result {
        let out = output::render_single(&global.output, player, detail, |p| p.id.to_string())?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: PlayersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PlayersCommand::List { active } => {
            let players = EntityController::<Players>::new(controller.clone())
                .list()
                .await?;
            let shown: Vec<Player> = players
                .iter()
                .filter(|p| !active || p.active)
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output,
                &shown,
                |p| PlayerRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlayersCommand::Get { id } => {
            let player = controller.get_player(&util::parse_id(&id, "id")?).await?;
            let out = output::render_single(&global.output, &player, detail, |p| p.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlayersCommand::Create {
            name,
            surname,
            birth_date,
            position,
            number,
            inactive,
            from_file,
        } => {
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<PlayerInput>(path)?
            } else {
                PlayerInput {
                    name: name.unwrap_or_default(),
                    surname,
                    birth_date: util::parse_opt_date(birth_date.as_deref(), "birth-date")?,
                    position,
                    number,
                    active: !inactive,
                }
            };
            let result = util::submit_form::<Players>(controller, None, |form| {
                *form = input;
                Ok(())
            })
            .await?;
            output::success(global, "Player created");
            print_player(&result, global)
        }

        PlayersCommand::Update {
            id,
            from_file,
            name,
            surname,
            birth_date,
            position,
            number,
            active,
        } => {
            let current = controller.get_player(&util::parse_id(&id, "id")?).await?;
            let replacement = from_file
                .as_deref()
                .map(util::read_json_file::<PlayerInput>)
                .transpose()?;
            let birth_date = util::parse_opt_date(birth_date.as_deref(), "birth-date")?;

            let result = util::submit_form::<Players>(controller, Some(&current), |form| {
                if let Some(full) = replacement {
                    *form = full;
                }
                if let Some(name) = name {
                    form.name = name;
                }
                if surname.is_some() {
                    form.surname = surname;
                }
                if birth_date.is_some() {
                    form.birth_date = birth_date;
                }
                if position.is_some() {
                    form.position = position;
                }
                if number.is_some() {
                    form.number = number;
                }
                if let Some(active) = active {
                    form.active = active;
                }
                Ok(())
            })
            .await?;
            output::success(global, "Player updated");
            print_player(&result, global)
        }

        PlayersCommand::Delete { id } => {
            let eid = util::parse_id(&id, "id")?;
            if !util::confirm(&format!("Delete player {id}?"), global.yes)? {
                return Ok(());
            }
            EntityController::<Players>::new(controller.clone())
                .delete(eid)
                .await?;
            output::success(global, "Player deleted");
            Ok(())
        }
    }
}
