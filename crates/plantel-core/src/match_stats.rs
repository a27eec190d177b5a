// ── Per-match statistics editor ──
//
// Bulk-edits one statistic line per player for a single match and submits
// the whole batch in one `registro-multiple` request.

use tracing::debug;

use crate::command::{Command, CommandResult};
use crate::controller::Controller;
use crate::entity::MutationState;
use crate::error::CoreError;
use crate::model::{EntityId, Player, Statistic, StatisticInput};

/// One editable line in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub player_name: String,
    pub input: StatisticInput,
}

/// Editor state for one match.
pub struct MatchStatsEditor {
    controller: Controller,
    match_id: EntityId,
    rows: Vec<StatRow>,
    mutation: MutationState,
}

impl MatchStatsEditor {
    /// Load existing statistics for `match_id` and build one row per
    /// player in `players`, in that order.
    ///
    /// Players without a recorded line start zeroed with `starter = false`.
    /// Lines for players not in `players` are ignored. A failed fetch is
    /// returned as-is.
    pub async fn open(
        controller: &Controller,
        match_id: &EntityId,
        players: &[Player],
    ) -> Result<Self, CoreError> {
        let existing = controller.match_statistics(match_id).await?;

        let rows = players
            .iter()
            .map(|player| {
                let input = existing
                    .lines
                    .iter()
                    .rev()
                    .find(|line| line.player_id == player.id)
                    .map_or_else(
                        || StatisticInput::zeroed(player.id.clone(), match_id.clone()),
                        StatisticInput::from,
                    );
                StatRow {
                    player_name: player.display_name(),
                    input,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            match_id = %match_id,
            rows = rows.len(),
            prefilled = existing.lines.len(),
            "match stats editor opened"
        );

        Ok(Self {
            controller: controller.clone(),
            match_id: match_id.clone(),
            rows,
            mutation: MutationState::Idle,
        })
    }

    pub fn match_id(&self) -> &EntityId {
        &self.match_id
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, player_id: &EntityId) -> Option<&mut StatisticInput> {
        self.rows
            .iter_mut()
            .find(|row| &row.input.player_id == player_id)
            .map(|row| &mut row.input)
    }

    /// Exactly one record per row, edited or not.
    pub fn records(&self) -> Vec<StatisticInput> {
        self.rows.iter().map(|row| row.input.clone()).collect()
    }

    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    /// Submit every row in one request.
    ///
    /// All-or-nothing: on failure the rows are kept untouched and the
    /// error is both returned and kept in [`mutation()`](Self::mutation).
    pub async fn submit(&mut self) -> Result<Vec<Statistic>, CoreError> {
        if self.rows.is_empty() {
            let err = CoreError::Validation {
                message: format!("no players to record statistics for in match {}", self.match_id),
            };
            self.mutation = MutationState::Failed(err.clone());
            return Err(err);
        }
        self.mutation = MutationState::Pending;
        let result = self
            .controller
            .execute(Command::RecordStatistics(self.records()))
            .await
            .and_then(|result| match result {
                CommandResult::Statistics(saved) => Ok(saved),
                other => Err(CoreError::Internal(format!(
                    "unexpected result for statistics batch: {other:?}"
                ))),
            });

        self.mutation = match &result {
            Ok(_) => MutationState::Succeeded,
            Err(e) => MutationState::Failed(e.clone()),
        };
        result
    }
}
