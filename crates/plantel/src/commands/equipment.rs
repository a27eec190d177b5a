//! Equipment command handlers.

use tabled::Tabled;

use plantel_core::{
    CommandResult, Controller, EntityController, Equipment, EquipmentInput, EquipmentItems,
};

use crate::cli::{EquipmentArgs, EquipmentCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct EquipmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Qty")]
    quantity: i32,
    #[tabled(rename = "Active")]
    active: &'static str,
}

impl From<&Equipment> for EquipmentRow {
    fn from(e: &Equipment) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name.clone(),
            kind: e.kind.to_string(),
            quantity: e.quantity,
            active: output::yes_no(e.active),
        }
    }
}

fn detail(e: &Equipment) -> String {
    let mut lines = vec![
        format!("ID:        {}", e.id),
        format!("Name:      {}", e.name),
        format!("Kind:      {}", e.kind),
        format!("Quantity:  {}", e.quantity),
        format!("Active:    {}", output::yes_no(e.active)),
    ];
    if let Some(ref description) = e.description {
        lines.push(format!("Notes:     {description}"));
    }
    lines.join("\n")
}

fn print_equipment(result: &CommandResult, global: &GlobalOpts) -> Result<(), CliError> {
    if let CommandResult::Equipment(item) = result {
        let out = output::render_single(&global.output, item, detail, |e| e.id.to_string())?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

/// Render a list of equipment (also used by `assignments player`).
pub(crate) fn print_list(items: &[Equipment], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        items,
        |e| EquipmentRow::from(e),
        |e| e.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: EquipmentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut entities = EntityController::<EquipmentItems>::new(controller.clone());

    match args.command {
        EquipmentCommand::List => {
            let items = entities.list().await?;
            print_list(&items, global)
        }

        EquipmentCommand::Create {
            name,
            description,
            kind,
            quantity,
            from_file,
        } => {
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<EquipmentInput>(path)?
            } else {
                EquipmentInput {
                    name: name.unwrap_or_default(),
                    description,
                    kind: util::equipment_kind(kind),
                    quantity,
                    active: true,
                }
            };
            entities.open_create();
            if let Some(form) = entities.form_mut() {
                *form = input;
            }
            let result = entities.submit().await?;
            output::success(global, "Equipment created");
            print_equipment(&result, global)
        }

        EquipmentCommand::Update {
            id,
            from_file,
            name,
            description,
            kind,
            quantity,
            active,
        } => {
            let eid = util::parse_id(&id, "id")?;
            let items = entities.list().await?;
            let current = items
                .iter()
                .find(|e| e.id == eid)
                .ok_or_else(|| CliError::not_found("Equipment", &id, "equipment list"))?;
            let replacement = from_file
                .as_deref()
                .map(util::read_json_file::<EquipmentInput>)
                .transpose()?;

            let result = util::submit_form::<EquipmentItems>(controller, Some(current), |form| {
                if let Some(full) = replacement {
                    *form = full;
                }
                if let Some(name) = name {
                    form.name = name;
                }
                if description.is_some() {
                    form.description = description;
                }
                if let Some(kind) = kind {
                    form.kind = util::equipment_kind(kind);
                }
                if let Some(quantity) = quantity {
                    form.quantity = quantity;
                }
                if let Some(active) = active {
                    form.active = active;
                }
                Ok(())
            })
            .await?;
            output::success(global, "Equipment updated");
            print_equipment(&result, global)
        }

        EquipmentCommand::Delete { id } => {
            let eid = util::parse_id(&id, "id")?;
            if !util::confirm(&format!("Delete equipment {id}?"), global.yes)? {
                return Ok(());
            }
            entities.delete(eid).await?;
            output::success(global, "Equipment deleted");
            Ok(())
        }
    }
}
