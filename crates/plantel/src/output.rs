//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Status lines go to stderr so stdout stays parseable.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// `✓ message` on stderr, unless `--quiet`.
pub fn success(global: &GlobalOpts, message: &str) {
    if global.quiet {
        return;
    }
    if should_color(&global.color) {
        eprintln!("{} {message}", "✓".green().bold());
    } else {
        eprintln!("✓ {message}");
    }
}

/// Neutral notice on stderr, unless `--quiet`.
pub fn notice(global: &GlobalOpts, message: &str) {
    if global.quiet {
        return;
    }
    if should_color(&global.color) {
        eprintln!("{}", message.dimmed());
    } else {
        eprintln!("{message}");
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item detail views are
/// key/value lines rather than a `Tabled` row.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Cell helpers ─────────────────────────────────────────────────────

pub fn opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".into(), ToString::to_string)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        id: i64,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![Item { id: 1, name: "Ana" }, Item { id: 2, name: "Bea" }]
    }

    fn render(format: &OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| ItemRow {
                id: i.id,
                name: i.name,
            },
            |i| i.id.to_string(),
        )
        .expect("render")
    }

    #[test]
    fn plain_is_one_id_per_line() {
        assert_eq!(render(&OutputFormat::Plain), "1\n2");
    }

    #[test]
    fn compact_json_keeps_order() {
        assert_eq!(
            render(&OutputFormat::JsonCompact),
            r#"[{"id":1,"name":"Ana"},{"id":2,"name":"Bea"}]"#
        );
    }

    #[test]
    fn table_has_headers() {
        let table = render(&OutputFormat::Table);
        assert!(table.contains("ID"));
        assert!(table.contains("Bea"));
    }

    #[test]
    fn empty_cells_render_as_dash() {
        assert_eq!(opt::<i32>(None), "-");
        assert_eq!(opt(Some(&7)), "7");
    }
}
