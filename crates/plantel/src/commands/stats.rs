//! Statistics command handlers.

use tabled::Tabled;

use plantel_core::{
    Command as CoreCommand, CommandResult, Controller, Statistic, StatisticInput,
    StatisticsSummary, SummaryFilter, SummaryView,
};

use crate::cli::{GlobalOpts, OutputFormat, StatsArgs, StatsCommand, SummaryArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "M")]
    matches: u32,
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
    #[tabled(rename = "Avg")]
    average_minutes: String,
}

impl From<&StatisticsSummary> for SummaryRow {
    fn from(s: &StatisticsSummary) -> Self {
        Self {
            player: s.player_name.clone(),
            matches: s.matches,
            goals: s.goals,
            assists: s.assists,
            yellow_cards: s.yellow_cards,
            red_cards: s.red_cards,
            minutes: s.minutes,
            average_minutes: format!("{:.1}", s.average_minutes),
        }
    }
}

fn summary_detail(s: &StatisticsSummary) -> String {
    [
        format!("Player:        {} (#{})", s.player_name, s.player_id),
        format!("Matches:       {}", s.matches),
        format!("Goals:         {}", s.goals),
        format!("Assists:       {}", s.assists),
        format!("Yellow cards:  {}", s.yellow_cards),
        format!("Red cards:     {}", s.red_cards),
        format!("Minutes:       {}", s.minutes),
        format!("Avg minutes:   {:.1}", s.average_minutes),
    ]
    .join("\n")
}

fn line_detail(s: &Statistic) -> String {
    [
        format!("ID:            {}", s.id),
        format!("Player:        {}", s.player_id),
        format!("Match:         {}", s.match_id),
        format!("Starter:       {}", output::yes_no(s.starter)),
        format!("Minutes:       {}", s.minutes_played),
        format!("Goals:         {}", s.goals),
        format!("Assists:       {}", s.assists),
        format!("Yellow cards:  {}", s.yellow_cards),
        format!("Red cards:     {}", s.red_cards),
    ]
    .join("\n")
}

/// Sort/filter state for `stats summary`.
///
/// Starts from the default view and applies the header-click rules: the
/// requested column is descending, `--asc` clicks it once more.
fn summary_view(args: &SummaryArgs) -> SummaryView {
    let field = util::sort_field(args.sort);
    let mut view = SummaryView::new();
    if view.sort.field != field {
        view.toggle(field);
    }
    if args.asc {
        view.toggle(field);
    }
    view.set_filter(SummaryFilter {
        min_goals: args.min_goals,
        min_assists: args.min_assists,
        min_matches: args.min_matches,
        min_minutes: args.min_minutes,
        max_yellow_cards: args.max_yellow_cards,
        max_red_cards: args.max_red_cards,
    });
    view
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: StatsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StatsCommand::Summary(summary) => {
            let view = summary_view(&summary);
            let rows = view.fetch(controller).await?;
            if matches!(global.output, OutputFormat::Table) {
                let arrow = if view.sort.descending { "desc" } else { "asc" };
                output::notice(
                    global,
                    &format!("Sorted by {} ({arrow})", view.sort.field.as_wire()),
                );
            }
            let out = output::render_list(
                &global.output,
                &rows,
                |s| SummaryRow::from(s),
                |s| s.player_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatsCommand::Player { id } => {
            let totals = controller
                .player_statistics(&util::parse_id(&id, "id")?)
                .await?;
            let out = output::render_single(&global.output, &*totals, summary_detail, |s| {
                s.player_id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StatsCommand::Record {
            player,
            match_id,
            goals,
            assists,
            yellow_cards,
            red_cards,
            minutes,
            starter,
            from_file,
        } => {
            let input = if let Some(ref path) = from_file {
                util::read_json_file::<StatisticInput>(path)?
            } else {
                StatisticInput {
                    player_id: util::parse_id(player.as_deref().unwrap_or_default(), "player")?,
                    match_id: util::parse_id(match_id.as_deref().unwrap_or_default(), "match")?,
                    goals,
                    assists,
                    yellow_cards,
                    red_cards,
                    minutes_played: minutes,
                    starter,
                }
            };
            let result = controller
                .execute(CoreCommand::RecordStatistic(input))
                .await?;
            output::success(global, "Statistics recorded");
            if let CommandResult::Statistic(ref line) = result {
                let out =
                    output::render_single(&global.output, line, line_detail, |s| s.id.to_string())?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use plantel_core::SortField;

    use super::*;
    use crate::cli::{Cli, Command};

    fn view_for(args: &[&str]) -> SummaryView {
        let mut argv = vec!["plantel", "stats", "summary"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).expect("parse").command {
            Command::Stats(StatsArgs {
                command: StatsCommand::Summary(summary),
            }) => summary_view(&summary),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn default_is_goals_descending() {
        let view = view_for(&[]);
        assert_eq!(view.sort.field, SortField::Goals);
        assert!(view.sort.descending);
    }

    #[test]
    fn asc_flips_the_same_column() {
        let view = view_for(&["--asc"]);
        assert_eq!(view.sort.field, SortField::Goals);
        assert!(!view.sort.descending);
    }

    #[test]
    fn other_column_starts_descending() {
        let view = view_for(&["--sort", "minutes"]);
        assert_eq!(view.sort.field, SortField::Minutes);
        assert!(view.sort.descending);

        let view = view_for(&["--sort", "avg", "--asc"]);
        assert_eq!(view.sort.field, SortField::AverageMinutes);
        assert!(!view.sort.descending);
    }

    #[test]
    fn filters_reach_the_query() {
        let view = view_for(&["--min-matches", "3", "--max-red-cards", "0"]);
        let params = view.query().to_params();
        assert_eq!(params.min_matches, Some(3));
        assert_eq!(params.max_red_cards, Some(0));
        assert_eq!(params.min_goals, None);
    }
}
