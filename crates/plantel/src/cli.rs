//! Clap derive structures for the `plantel` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Identifiers and dates stay strings here and are parsed by the handlers,
//! so `build.rs` can compile this file with clap alone.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// plantel -- squad, attendance, equipment and match statistics
#[derive(Debug, Parser)]
#[command(
    name = "plantel",
    version,
    about = "Manage a football squad from the command line",
    long_about = "Players, attendance, equipment custody, matches and per-player\n\
        statistics against a plantel backend.\n\n\
        Sorting of the statistics summary happens on the backend; the CLI only\n\
        chooses the column and direction.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PLANTEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "PLANTEL_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PLANTEL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "PLANTEL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default: profile, then 30)
    #[arg(long, env = "PLANTEL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventKindArg {
    /// Training session (ENTRENAMIENTO)
    Training,
    /// Match day (PARTIDO)
    Match,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EquipmentKindArg {
    /// PELOTA
    Ball,
    /// PECHERA
    Bib,
    /// AGUA
    Water,
    /// CONJUNTO
    Kit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchKindArg {
    /// Competitive match (PARTIDO)
    Match,
    /// ENTRENAMIENTO
    Training,
    /// AMISTOSO
    Friendly,
    /// TORNEO
    Tournament,
}

/// Summary columns the backend can sort by.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SummaryColumn {
    Matches,
    Goals,
    Assists,
    Yellow,
    Red,
    Minutes,
    #[value(alias = "avg")]
    AverageMinutes,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the squad
    #[command(alias = "p")]
    Players(PlayersArgs),

    /// Record and review attendance
    #[command(alias = "att")]
    Attendance(AttendanceArgs),

    /// Manage club equipment
    #[command(alias = "eq")]
    Equipment(EquipmentArgs),

    /// Hand out, return and rotate equipment
    #[command(alias = "asg")]
    Assignments(AssignmentsArgs),

    /// Manage matches and their statistics sheets
    #[command(alias = "m")]
    Matches(MatchesArgs),

    /// Player statistics and the season summary
    Stats(StatsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PLAYERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PlayersArgs {
    #[command(subcommand)]
    pub command: PlayersCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlayersCommand {
    /// List players
    #[command(alias = "ls")]
    List {
        /// Only active players
        #[arg(long)]
        active: bool,
    },

    /// Get player details
    Get {
        /// Player ID
        id: String,
    },

    /// Add a player to the squad
    Create {
        /// First name
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        /// Surname
        #[arg(long)]
        surname: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,

        /// Playing position
        #[arg(long)]
        position: Option<String>,

        /// Shirt number
        #[arg(long)]
        number: Option<i32>,

        /// Create as inactive
        #[arg(long)]
        inactive: bool,

        /// Create from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with = "name")]
        from_file: Option<PathBuf>,
    },

    /// Update a player (unset flags keep their current value)
    Update {
        /// Player ID
        id: String,

        /// Load the full payload from a JSON file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        surname: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        number: Option<i32>,

        /// Activate or deactivate the player
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a player
    Delete {
        /// Player ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ATTENDANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    pub command: AttendanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// List attendance records
    #[command(alias = "ls")]
    List {
        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Only this kind of session
        #[arg(long, value_enum)]
        kind: Option<EventKindArg>,
    },

    /// Attendance history of one player
    Player {
        /// Player ID
        id: String,
    },

    /// Record attendance for one player
    Record {
        /// Player ID
        #[arg(long, required_unless_present = "from_file")]
        player: Option<String>,

        /// Session date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Kind of session
        #[arg(long, value_enum, default_value = "training")]
        kind: EventKindArg,

        /// Record the player as absent
        #[arg(long)]
        absent: bool,

        /// Record from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with = "player")]
        from_file: Option<PathBuf>,
    },

    /// Correct an attendance record
    Update {
        /// Attendance record ID
        id: String,

        /// Load the full payload from a JSON file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,

        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, value_enum)]
        kind: Option<EventKindArg>,

        /// Mark present (true) or absent (false)
        #[arg(long, action = clap::ArgAction::Set)]
        present: Option<bool>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EQUIPMENT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EquipmentArgs {
    #[command(subcommand)]
    pub command: EquipmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// List equipment
    #[command(alias = "ls")]
    List,

    /// Add a piece of equipment
    Create {
        /// Equipment name
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Category
        #[arg(long, value_enum, default_value = "ball")]
        kind: EquipmentKindArg,

        /// Units available
        #[arg(long, default_value = "1")]
        quantity: i32,

        /// Create from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with = "name")]
        from_file: Option<PathBuf>,
    },

    /// Update equipment (unset flags keep their current value)
    Update {
        /// Equipment ID
        id: String,

        /// Load the full payload from a JSON file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        kind: Option<EquipmentKindArg>,

        #[arg(long)]
        quantity: Option<i32>,

        /// Activate or retire the item
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete equipment
    Delete {
        /// Equipment ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ASSIGNMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AssignmentsArgs {
    #[command(subcommand)]
    pub command: AssignmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssignmentsCommand {
    /// List assignments pending return
    #[command(alias = "ls")]
    List,

    /// Equipment currently held by one player
    Player {
        /// Player ID
        id: String,
    },

    /// Hand equipment to a player
    Create {
        /// Player ID
        #[arg(long)]
        player: String,

        /// Equipment ID
        #[arg(long)]
        equipment: String,

        /// Assignment date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Mark an assignment as returned
    Return {
        /// Assignment ID
        id: String,
    },

    /// Remove a player/equipment pairing
    Unassign {
        /// Player ID
        player: String,

        /// Equipment ID
        equipment: String,
    },

    /// Let the backend redistribute equipment among active players
    Rotate,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MATCHES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MatchesArgs {
    #[command(subcommand)]
    pub command: MatchesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MatchesCommand {
    /// List matches
    #[command(alias = "ls")]
    List,

    /// Get match details
    Get {
        /// Match ID
        id: String,
    },

    /// Schedule a match
    Create {
        /// Match date (YYYY-MM-DD)
        #[arg(long, required_unless_present = "from_file")]
        date: Option<String>,

        /// Opponent name
        #[arg(long, required_unless_present = "from_file")]
        opponent: Option<String>,

        /// Our goals
        #[arg(long)]
        home_score: Option<i32>,

        /// Their goals
        #[arg(long)]
        away_score: Option<i32>,

        #[arg(long)]
        venue: Option<String>,

        #[arg(long, value_enum, default_value = "match")]
        kind: MatchKindArg,

        /// Create from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with_all = &["date", "opponent"])]
        from_file: Option<PathBuf>,
    },

    /// Update a match, e.g. to enter the final score
    Update {
        /// Match ID
        id: String,

        /// Load the full payload from a JSON file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,

        /// Match date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        opponent: Option<String>,

        #[arg(long)]
        home_score: Option<i32>,

        #[arg(long)]
        away_score: Option<i32>,

        #[arg(long)]
        venue: Option<String>,

        #[arg(long, value_enum)]
        kind: Option<MatchKindArg>,
    },

    /// Delete a match
    Delete {
        /// Match ID
        id: String,
    },

    /// Show the statistics sheet of a match
    Stats {
        /// Match ID
        id: String,
    },

    /// Fill in the statistics sheet for every active player, then submit once
    EditStats {
        /// Match ID
        id: String,

        /// JSON array of lines keyed by `player_id` instead of prompting
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Per-player totals, sorted by the backend
    Summary(SummaryArgs),

    /// Totals for one player
    Player {
        /// Player ID
        id: String,
    },

    /// Record one player's line for one match
    Record {
        /// Player ID
        #[arg(long, required_unless_present = "from_file")]
        player: Option<String>,

        /// Match ID
        #[arg(long = "match", required_unless_present = "from_file")]
        match_id: Option<String>,

        #[arg(long, default_value = "0")]
        goals: u32,

        #[arg(long, default_value = "0")]
        assists: u32,

        #[arg(long, default_value = "0")]
        yellow_cards: u32,

        #[arg(long, default_value = "0")]
        red_cards: u32,

        #[arg(long, default_value = "0")]
        minutes: u32,

        /// Player started the match
        #[arg(long)]
        starter: bool,

        /// Record from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with_all = &["player", "match_id"])]
        from_file: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Column to sort by (descending unless --asc)
    #[arg(long, short = 's', value_enum, default_value = "goals")]
    pub sort: SummaryColumn,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,

    #[arg(long)]
    pub min_goals: Option<u32>,

    #[arg(long)]
    pub min_assists: Option<u32>,

    #[arg(long)]
    pub min_matches: Option<u32>,

    #[arg(long)]
    pub min_minutes: Option<u32>,

    #[arg(long)]
    pub max_yellow_cards: Option<u32>,

    #[arg(long)]
    pub max_red_cards: Option<u32>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: backend, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
