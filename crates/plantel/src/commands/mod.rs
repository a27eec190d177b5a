//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod assignments;
pub mod attendance;
pub mod config_cmd;
pub mod equipment;
pub mod matches;
pub mod players;
pub mod stats;
pub mod util;

use plantel_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Players(args) => players::handle(controller, args, global).await,
        Command::Attendance(args) => attendance::handle(controller, args, global).await,
        Command::Equipment(args) => equipment::handle(controller, args, global).await,
        Command::Assignments(args) => assignments::handle(controller, args, global).await,
        Command::Matches(args) => matches::handle(controller, args, global).await,
        Command::Stats(args) => stats::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal {
            message: "config and completions run without a backend".into(),
        }),
    }
}
