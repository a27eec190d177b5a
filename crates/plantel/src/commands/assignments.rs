//! Equipment assignment command handlers.

use std::collections::HashMap;

use tabled::Tabled;

use plantel_core::{
    Assignment, Assignments, Command as CoreCommand, CommandResult, Controller, EntityController,
    EntityId,
};

use crate::cli::{AssignmentsArgs, AssignmentsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{equipment, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AssignmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Equipment")]
    equipment: String,
    #[tabled(rename = "Since")]
    assigned_on: String,
}

/// Display names for player and equipment ids.
#[derive(Default)]
struct Names {
    players: HashMap<EntityId, String>,
    equipment: HashMap<EntityId, String>,
}

impl Names {
    async fn load(controller: &Controller) -> Result<Self, CliError> {
        let players = controller.players().await?;
        let equipment = controller.equipment().await?;
        Ok(Self {
            players: players
                .iter()
                .map(|p| (p.id.clone(), p.display_name()))
                .collect(),
            equipment: equipment
                .iter()
                .map(|e| (e.id.clone(), e.name.clone()))
                .collect(),
        })
    }

    fn label(map: &HashMap<EntityId, String>, id: &EntityId) -> String {
        map.get(id)
            .map_or_else(|| format!("#{id}"), |name| format!("{name} (#{id})"))
    }

    fn row(&self, a: &Assignment) -> AssignmentRow {
        AssignmentRow {
            id: a.id.to_string(),
            player: Self::label(&self.players, &a.player_id),
            equipment: Self::label(&self.equipment, &a.equipment_id),
            assigned_on: output::opt(a.assigned_on.as_ref()),
        }
    }
}

fn detail(a: &Assignment) -> String {
    [
        format!("ID:         {}", a.id),
        format!("Player:     {}", a.player_id),
        format!("Equipment:  {}", a.equipment_id),
        format!("Since:      {}", output::opt(a.assigned_on.as_ref())),
        format!("Active:     {}", output::yes_no(a.active)),
    ]
    .join("\n")
}

async fn print_assignments(
    controller: &Controller,
    entities: &EntityController<Assignments>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let assignments = entities.list().await?;
    let names = if matches!(global.output, OutputFormat::Table) {
        Names::load(controller).await?
    } else {
        Names::default()
    };
    let out = output::render_list(
        &global.output,
        &assignments,
        |a| names.row(a),
        |a| a.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_message(result: &CommandResult, global: &GlobalOpts) {
    if let CommandResult::Message(message) = result {
        output::notice(global, message);
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: AssignmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entities = EntityController::<Assignments>::new(controller.clone());

    match args.command {
        AssignmentsCommand::List => print_assignments(controller, &entities, global).await,

        AssignmentsCommand::Player { id } => {
            let items = controller
                .player_equipment(&util::parse_id(&id, "id")?)
                .await?;
            equipment::print_list(&items, global)
        }

        AssignmentsCommand::Create {
            player,
            equipment,
            date,
        } => {
            let player_id = util::parse_id(&player, "player")?;
            let equipment_id = util::parse_id(&equipment, "equipment")?;
            let assigned_on = util::parse_opt_date(date.as_deref(), "date")?;

            let result = util::submit_form::<Assignments>(controller, None, |form| {
                form.player_id = Some(player_id);
                form.equipment_id = Some(equipment_id);
                form.assigned_on = Some(assigned_on.unwrap_or_else(util::today));
                Ok(())
            })
            .await?;
            output::success(global, "Equipment assigned");
            if let CommandResult::Assignment(ref assignment) = result {
                let out = output::render_single(&global.output, assignment, detail, |a| {
                    a.id.to_string()
                })?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        AssignmentsCommand::Return { id } => {
            let result = entities.delete(util::parse_id(&id, "id")?).await?;
            output::success(global, "Equipment returned");
            print_message(&result, global);
            Ok(())
        }

        AssignmentsCommand::Unassign { player, equipment } => {
            let player_id = util::parse_id(&player, "player")?;
            let equipment_id = util::parse_id(&equipment, "equipment")?;
            if !util::confirm(
                &format!("Unassign equipment {equipment} from player {player}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let result = controller
                .execute(CoreCommand::UnassignEquipment {
                    player_id,
                    equipment_id,
                })
                .await?;
            output::success(global, "Equipment unassigned");
            print_message(&result, global);
            Ok(())
        }

        AssignmentsCommand::Rotate => {
            if !util::confirm(
                "Rotate equipment among all active players? Current assignments will change",
                global.yes,
            )? {
                return Ok(());
            }
            entities.rotate().await?;
            output::success(global, "Equipment rotated");
            print_assignments(controller, &entities, global).await
        }
    }
}
