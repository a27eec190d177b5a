//! Match command handlers, including the per-match statistics sheet.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::Path;

use dialoguer::{Confirm, Input};
use serde::Deserialize;
use tabled::Tabled;

use plantel_core::{
    Controller, EntityController, EntityId, Match, MatchInput, MatchStatistics, MatchStatsEditor,
    Matches, Player, Statistic, StatisticInput,
};

use crate::cli::{GlobalOpts, MatchesArgs, MatchesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Opponent")]
    opponent: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Venue")]
    venue: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

impl From<&Match> for MatchRow {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id.to_string(),
            date: m.date.to_string(),
            opponent: m.opponent.clone(),
            score: m.score_line(),
            venue: m.venue.clone(),
            kind: m.kind.to_string(),
        }
    }
}

/// One statistics line; shared by the sheet view and the editor preview.
#[derive(Tabled)]
pub(crate) struct LineRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Starter")]
    starter: &'static str,
    #[tabled(rename = "G")]
    goals: u32,
    #[tabled(rename = "A")]
    assists: u32,
    #[tabled(rename = "YC")]
    yellow_cards: u32,
    #[tabled(rename = "RC")]
    red_cards: u32,
    #[tabled(rename = "Min")]
    minutes: u32,
}

impl LineRow {
    fn new(player: String, line: &StatisticInput) -> Self {
        Self {
            player,
            starter: output::yes_no(line.starter),
            goals: line.goals,
            assists: line.assists,
            yellow_cards: line.yellow_cards,
            red_cards: line.red_cards,
            minutes: line.minutes_played,
        }
    }
}

fn detail(m: &Match) -> String {
    [
        format!("ID:        {}", m.id),
        format!("Date:      {}", m.date),
        format!("Opponent:  {}", m.opponent),
        format!("Score:     {}", m.score_line()),
        format!("Venue:     {}", if m.venue.is_empty() { "-" } else { &m.venue }),
        format!("Kind:      {}", m.kind),
        format!("Played:    {}", output::yes_no(m.is_played())),
    ]
    .join("\n")
}

fn sheet(stats: &MatchStatistics, names: &HashMap<EntityId, String>) -> String {
    let score = match (stats.home_score, stats.away_score) {
        (Some(home), Some(away)) => format!("{home}-{away}"),
        _ => "-".into(),
    };
    let mut out = format!(
        "Match {}: {} vs {} ({score})\n",
        stats.match_id,
        output::opt(stats.date.as_ref()),
        stats.opponent.as_deref().unwrap_or("?"),
    );
    if stats.lines.is_empty() {
        out.push_str("No statistics recorded yet.");
        return out;
    }
    let rows: Vec<LineRow> = stats
        .lines
        .iter()
        .map(|line| {
            let name = names
                .get(&line.player_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", line.player_id));
            LineRow::new(name, &StatisticInput::from(line))
        })
        .collect();
    out.push_str(
        &tabled::Table::new(rows)
            .with(tabled::settings::Style::rounded())
            .to_string(),
    );
    out
}

fn print_match(m: &Match, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, m, detail, |m| m.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_saved(saved: &[Statistic], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        saved,
        |s| LineRow::new(format!("#{}", s.player_id), &StatisticInput::from(s)),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Statistics editor ───────────────────────────────────────────────

/// A `--from-file` entry: fields left out keep the prefilled value.
#[derive(Debug, Deserialize)]
struct LineEdit {
    player_id: EntityId,
    goals: Option<u32>,
    assists: Option<u32>,
    yellow_cards: Option<u32>,
    red_cards: Option<u32>,
    minutes_played: Option<u32>,
    starter: Option<bool>,
}

impl LineEdit {
    fn apply(self, line: &mut StatisticInput) {
        if let Some(v) = self.goals {
            line.goals = v;
        }
        if let Some(v) = self.assists {
            line.assists = v;
        }
        if let Some(v) = self.yellow_cards {
            line.yellow_cards = v;
        }
        if let Some(v) = self.red_cards {
            line.red_cards = v;
        }
        if let Some(v) = self.minutes_played {
            line.minutes_played = v;
        }
        if let Some(v) = self.starter {
            line.starter = v;
        }
    }
}

fn apply_file(editor: &mut MatchStatsEditor, path: &Path) -> Result<(), CliError> {
    let edits: Vec<LineEdit> = util::read_json_file(path)?;
    for edit in edits {
        let player_id = edit.player_id.clone();
        let line = editor.row_mut(&player_id).ok_or_else(|| CliError::Validation {
            field: "from-file".into(),
            reason: format!("player {player_id} is not an active player"),
        })?;
        edit.apply(line);
    }
    Ok(())
}

fn prompt_count(label: &str, current: u32) -> Result<u32, CliError> {
    Input::<u32>::new()
        .with_prompt(format!("  {label}"))
        .default(current)
        .interact_text()
        .map_err(util::prompt_err)
}

fn prompt_rows(editor: &mut MatchStatsEditor) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "from-file".into(),
            reason: "no terminal to prompt on; pass the lines with --from-file".into(),
        });
    }

    let players: Vec<(EntityId, String)> = editor
        .rows()
        .iter()
        .map(|row| (row.input.player_id.clone(), row.player_name.clone()))
        .collect();

    for (player_id, name) in players {
        let Some(line) = editor.row_mut(&player_id) else {
            continue;
        };
        eprintln!("{name}");
        line.starter = Confirm::new()
            .with_prompt("  Starter")
            .default(line.starter)
            .interact()
            .map_err(util::prompt_err)?;
        line.minutes_played = prompt_count("Minutes", line.minutes_played)?;
        line.goals = prompt_count("Goals", line.goals)?;
        line.assists = prompt_count("Assists", line.assists)?;
        line.yellow_cards = prompt_count("Yellow cards", line.yellow_cards)?;
        line.red_cards = prompt_count("Red cards", line.red_cards)?;
    }
    Ok(())
}

async fn edit_stats(
    controller: &Controller,
    id: &str,
    from_file: Option<&Path>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let match_id = util::parse_id(id, "id")?;
    let players = controller.players().await?;
    let active: Vec<Player> = players.iter().filter(|p| p.active).cloned().collect();
    if active.is_empty() {
        return Err(CliError::Validation {
            field: "players".into(),
            reason: "there are no active players to record statistics for".into(),
        });
    }

    let mut editor = MatchStatsEditor::open(controller, &match_id, &active).await?;

    if let Some(path) = from_file {
        apply_file(&mut editor, path)?;
    } else {
        prompt_rows(&mut editor)?;
        let preview: Vec<LineRow> = editor
            .rows()
            .iter()
            .map(|row| LineRow::new(row.player_name.clone(), &row.input))
            .collect();
        eprintln!(
            "{}",
            tabled::Table::new(preview).with(tabled::settings::Style::rounded())
        );
        if !util::confirm(
            &format!("Submit {} lines for match {match_id}?", editor.rows().len()),
            global.yes,
        )? {
            return Ok(());
        }
    }

    let saved = editor.submit().await?;
    output::success(
        global,
        &format!("Recorded {} statistic lines for match {match_id}", saved.len()),
    );
    print_saved(&saved, global)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: MatchesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MatchesCommand::List => {
            let matches = EntityController::<Matches>::new(controller.clone())
                .list()
                .await?;
            let out = output::render_list(
                &global.output,
                &matches,
                |m| MatchRow::from(m),
                |m| m.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MatchesCommand::Get { id } => {
            let found = controller.match_detail(&util::parse_id(&id, "id")?).await?;
            print_match(&found, global)
        }

        MatchesCommand::Create {
            date,
            opponent,
            home_score,
            away_score,
            venue,
            kind,
            from_file,
        } => {
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<MatchInput>(path)?
            } else {
                MatchInput {
                    date: util::parse_date(date.as_deref().unwrap_or_default(), "date")?,
                    opponent: opponent.unwrap_or_default(),
                    home_score,
                    away_score,
                    venue: venue.unwrap_or_default(),
                    kind: util::match_kind(kind),
                }
            };
            let result = util::submit_form::<Matches>(controller, None, |form| {
                *form = input;
                Ok(())
            })
            .await?;
            output::success(global, "Match created");
            if let plantel_core::CommandResult::Match(ref created) = result {
                print_match(created, global)?;
            }
            Ok(())
        }

        MatchesCommand::Update {
            id,
            from_file,
            date,
            opponent,
            home_score,
            away_score,
            venue,
            kind,
        } => {
            let current = controller.match_detail(&util::parse_id(&id, "id")?).await?;
            let replacement = from_file
                .as_deref()
                .map(util::read_json_file::<MatchInput>)
                .transpose()?;
            let date = util::parse_opt_date(date.as_deref(), "date")?;

            let result = util::submit_form::<Matches>(controller, Some(&*current), |form| {
                if let Some(full) = replacement {
                    *form = full;
                }
                if let Some(date) = date {
                    form.date = date;
                }
                if let Some(opponent) = opponent {
                    form.opponent = opponent;
                }
                if home_score.is_some() {
                    form.home_score = home_score;
                }
                if away_score.is_some() {
                    form.away_score = away_score;
                }
                if let Some(venue) = venue {
                    form.venue = venue;
                }
                if let Some(kind) = kind {
                    form.kind = util::match_kind(kind);
                }
                Ok(())
            })
            .await?;
            output::success(global, "Match updated");
            if let plantel_core::CommandResult::Match(ref updated) = result {
                print_match(updated, global)?;
            }
            Ok(())
        }

        MatchesCommand::Delete { id } => {
            let eid = util::parse_id(&id, "id")?;
            if !util::confirm(&format!("Delete match {id}?"), global.yes)? {
                return Ok(());
            }
            EntityController::<Matches>::new(controller.clone())
                .delete(eid)
                .await?;
            output::success(global, "Match deleted");
            Ok(())
        }

        MatchesCommand::Stats { id } => {
            let stats = controller
                .match_statistics(&util::parse_id(&id, "id")?)
                .await?;
            let names: HashMap<EntityId, String> =
                if matches!(global.output, OutputFormat::Table) {
                    controller
                        .players()
                        .await?
                        .iter()
                        .map(|p| (p.id.clone(), p.display_name()))
                        .collect()
                } else {
                    HashMap::new()
                };
            let out = output::render_single(
                &global.output,
                &*stats,
                |s| sheet(s, &names),
                |s| {
                    s.lines
                        .iter()
                        .map(|l| l.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MatchesCommand::EditStats { id, from_file } => {
            edit_stats(controller, &id, from_file.as_deref(), global).await
        }
    }
}
