// ── Controller ──
//
// Connection lifecycle, cached queries and command routing for one
// backend. Reads go through the DataStore; writes go through the command
// channel and invalidate the families they touch once they succeed.

use std::sync::Arc;
use std::time::Duration;

use strum::IntoEnumIterator;
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use plantel_api::ApiClient;
use plantel_api::types::{
    AssignmentCreate, AttendanceCreateUpdate, EquipmentCreateUpdate, MatchCreateUpdate,
    PlayerCreateUpdate, StatisticCreate, SummaryParams,
};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::model::{
    Assignment, AssignmentInput, Attendance, AttendanceFilter, EntityId, Equipment, Match,
    MatchStatistics, Player, Statistic, StatisticsSummary, SummaryQuery,
};
use crate::store::{DataStore, Invalidation, QueryFamily};
use crate::stream::QueryStream;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Every clone shares the
/// same cache, so a mutation made through one clone is visible to views
/// holding another.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    store: Arc<DataStore>,
    connection_state: watch::Sender<ConnectionState>,
    command_tx: Mutex<mpsc::Sender<CommandEnvelope>>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    /// Child token for the current connection, replaced on reconnect.
    cancel_child: Mutex<CancellationToken>,
    client: Mutex<Option<ApiClient>>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller {
    /// Create a new Controller from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to verify the backend and start
    /// background tasks.
    pub fn new(config: ControllerConfig) -> Self {
        let store = Arc::new(DataStore::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ControllerInner {
                config,
                store,
                connection_state,
                command_tx: Mutex::new(command_tx),
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                client: Mutex::new(None),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the backend.
    ///
    /// Builds the HTTP client, verifies the backend with one player
    /// listing (which also seeds the players cache), and spawns the
    /// command processor plus any configured background tasks. Calling it
    /// while already connected is a no-op.
    pub async fn connect(&self) -> Result<(), CoreError> {
        if *self.inner.connection_state.borrow() == ConnectionState::Connected {
            debug!("already connected");
            return Ok(());
        }

        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        // Fresh child token for this connection (supports reconnect).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        let config = &self.inner.config;
        let client = match ApiClient::new(config.url.as_str(), &config.transport()) {
            Ok(client) => client,
            Err(e) => {
                self.inner.connection_state.send_replace(ConnectionState::Failed);
                return Err(e.into());
            }
        };

        let seeded = self
            .inner
            .store
            .players
            .refetch(|| load_players(client.clone()))
            .await;
        match seeded {
            Ok(players) => debug!(players = players.len(), "backend reachable"),
            Err(e) => {
                self.inner.connection_state.send_replace(ConnectionState::Failed);
                return Err(match e {
                    CoreError::Api { status, message } => CoreError::ConnectionFailed {
                        url: config.url.to_string(),
                        reason: format!("HTTP {status}: {message}"),
                    },
                    CoreError::NotFound { .. } => CoreError::ConnectionFailed {
                        url: config.url.to_string(),
                        reason: "no player endpoint at this address".into(),
                    },
                    other => other,
                });
            }
        }

        *self.inner.client.lock().await = Some(client);

        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let ctrl = self.clone();
            handles.push(tokio::spawn(command_processor_task(ctrl, rx, child.clone())));
        }

        if config.background_refetch {
            let ctrl = self.clone();
            let events = self.inner.store.invalidations();
            handles.push(tokio::spawn(refetch_task(ctrl, events, child.clone())));
        }

        let interval_secs = config.refresh_interval_secs;
        if interval_secs > 0 {
            let store = Arc::clone(&self.inner.store);
            handles.push(tokio::spawn(refresh_task(store, interval_secs, child)));
        }

        self.inner.connection_state.send_replace(ConnectionState::Connected);
        info!(url = %config.url, "connected to backend");
        Ok(())
    }

    /// Disconnect from the backend.
    ///
    /// Cancels background tasks, joins them and resets the connection
    /// state to [`Disconnected`](ConnectionState::Disconnected). The cache
    /// is kept.
    pub async fn disconnect(&self) {
        // Cancel the child token (not the parent, so reconnect works).
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        *self.inner.client.lock().await = None;

        // The previous receiver was consumed by the command processor.
        {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
            *self.inner.command_tx.lock().await = tx;
            *self.inner.command_rx.lock().await = Some(rx);
        }

        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        info!("disconnected");
    }

    /// Mark every family stale.
    pub fn invalidate_all(&self) {
        for family in QueryFamily::iter() {
            self.inner.store.invalidate(family);
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the backend.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result. On success the families in
    /// [`Command::invalidates`] have been invalidated by the time this
    /// returns; on failure nothing is invalidated.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if *self.inner.connection_state.borrow() != ConnectionState::Connected {
            return Err(CoreError::ControllerDisconnected);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        let command_tx = self.inner.command_tx.lock().await.clone();

        command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::ControllerDisconnected)?;

        rx.await.map_err(|_| CoreError::ControllerDisconnected)?
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Used by the CLI: background refetch and periodic refresh are
    /// disabled since only a single request-response cycle is needed.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.background_refetch = false;
        cfg.refresh_interval_secs = 0;

        let controller = Controller::new(cfg);
        controller.connect().await?;
        let result = f(controller.clone()).await;
        controller.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to cache invalidations.
    pub fn invalidations(&self) -> broadcast::Receiver<Invalidation> {
        self.inner.store.invalidations()
    }

    async fn client(&self) -> Result<ApiClient, CoreError> {
        self.inner
            .client
            .lock()
            .await
            .clone()
            .ok_or(CoreError::ControllerDisconnected)
    }

    // ── Cached queries ───────────────────────────────────────────

    pub async fn players(&self) -> Result<Arc<Vec<Player>>, CoreError> {
        let client = self.client().await?;
        self.inner
            .store
            .players
            .get_or_fetch(|| load_players(client))
            .await
    }

    pub async fn matches(&self) -> Result<Arc<Vec<Match>>, CoreError> {
        let client = self.client().await?;
        self.inner
            .store
            .matches
            .get_or_fetch(|| load_matches(client))
            .await
    }

    pub async fn equipment(&self) -> Result<Arc<Vec<Equipment>>, CoreError> {
        let client = self.client().await?;
        self.inner
            .store
            .equipment
            .get_or_fetch(|| load_equipment(client))
            .await
    }

    /// Active (pending return) assignments.
    pub async fn assignments(&self) -> Result<Arc<Vec<Assignment>>, CoreError> {
        let client = self.client().await?;
        self.inner
            .store
            .assignments
            .get_or_fetch(|| load_assignments(client))
            .await
    }

    /// Attendance, optionally narrowed by date and/or event type.
    pub async fn attendance(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Arc<Vec<Attendance>>, CoreError> {
        let client = self.client().await?;
        let filter = filter.clone();
        self.inner
            .store
            .attendance
            .slot(&filter)
            .get_or_fetch(|| load_attendance(client, filter))
            .await
    }

    pub async fn player_attendance(
        &self,
        player_id: &EntityId,
    ) -> Result<Arc<Vec<Attendance>>, CoreError> {
        let client = self.client().await?;
        let id = player_id.clone();
        self.inner
            .store
            .player_attendance
            .slot(player_id)
            .get_or_fetch(|| load_player_attendance(client, id))
            .await
    }

    /// Equipment currently held by one player.
    pub async fn player_equipment(
        &self,
        player_id: &EntityId,
    ) -> Result<Arc<Vec<Equipment>>, CoreError> {
        let client = self.client().await?;
        let id = player_id.clone();
        self.inner
            .store
            .player_equipment
            .slot(player_id)
            .get_or_fetch(|| load_player_equipment(client, id))
            .await
    }

    pub async fn match_detail(&self, match_id: &EntityId) -> Result<Arc<Match>, CoreError> {
        let client = self.client().await?;
        let id = match_id.clone();
        self.inner
            .store
            .match_details
            .slot(match_id)
            .get_or_fetch(|| load_match(client, id))
            .await
    }

    pub async fn player_statistics(
        &self,
        player_id: &EntityId,
    ) -> Result<Arc<StatisticsSummary>, CoreError> {
        let client = self.client().await?;
        let id = player_id.clone();
        self.inner
            .store
            .player_statistics
            .slot(player_id)
            .get_or_fetch(|| load_player_statistics(client, id))
            .await
    }

    pub async fn match_statistics(
        &self,
        match_id: &EntityId,
    ) -> Result<Arc<MatchStatistics>, CoreError> {
        let client = self.client().await?;
        let id = match_id.clone();
        self.inner
            .store
            .match_statistics
            .slot(match_id)
            .get_or_fetch(|| load_match_statistics(client, id))
            .await
    }

    /// Server-sorted summary, cached per full query (sort and filters).
    pub async fn statistics_summary(
        &self,
        query: &SummaryQuery,
    ) -> Result<Arc<Vec<StatisticsSummary>>, CoreError> {
        let client = self.client().await?;
        let params = query.to_params();
        self.inner
            .store
            .summaries
            .slot(query)
            .get_or_fetch(|| load_summary(client, params))
            .await
    }

    /// Uncached single-player lookup.
    pub async fn get_player(&self, id: &EntityId) -> Result<Player, CoreError> {
        let client = self.client().await?;
        let player = client
            .get_player(&id.to_wire())
            .await
            .map_err(|e| not_found_as("Player", id, e))?;
        Ok(Player::from(player))
    }

    // ── Subscriptions ────────────────────────────────────────────

    pub fn subscribe_players(&self) -> QueryStream<Vec<Player>> {
        self.inner.store.subscribe_players()
    }

    pub fn subscribe_matches(&self) -> QueryStream<Vec<Match>> {
        self.inner.store.subscribe_matches()
    }

    pub fn subscribe_equipment(&self) -> QueryStream<Vec<Equipment>> {
        self.inner.store.subscribe_equipment()
    }

    pub fn subscribe_assignments(&self) -> QueryStream<Vec<Assignment>> {
        self.inner.store.subscribe_assignments()
    }

    pub fn subscribe_summary(&self, query: &SummaryQuery) -> QueryStream<Vec<StatisticsSummary>> {
        self.inner.store.subscribe_summary(query)
    }

    pub fn subscribe_match_statistics(&self, match_id: &EntityId) -> QueryStream<MatchStatistics> {
        self.inner.store.subscribe_match_statistics(match_id)
    }

    // ── Background refetch ───────────────────────────────────────

    /// Refetch every subscribed query of `family`.
    ///
    /// Failures are logged and skipped; the slot keeps its stale value.
    async fn refetch_family(&self, family: QueryFamily) {
        let Ok(client) = self.client().await else {
            return;
        };
        let store = &self.inner.store;

        match family {
            QueryFamily::Players => {
                if store.players.has_subscribers() {
                    report(family, store.players.refetch(|| load_players(client)).await);
                }
            }
            QueryFamily::Matches => {
                if store.matches.has_subscribers() {
                    let c = client.clone();
                    report(family, store.matches.refetch(|| load_matches(c)).await);
                }
                for id in store.match_details.watched_keys() {
                    let slot = store.match_details.slot(&id);
                    report(family, slot.refetch(|| load_match(client.clone(), id)).await);
                }
            }
            QueryFamily::Equipment => {
                if store.equipment.has_subscribers() {
                    report(family, store.equipment.refetch(|| load_equipment(client)).await);
                }
            }
            QueryFamily::Assignments => {
                if store.assignments.has_subscribers() {
                    let c = client.clone();
                    report(family, store.assignments.refetch(|| load_assignments(c)).await);
                }
                for id in store.player_equipment.watched_keys() {
                    let slot = store.player_equipment.slot(&id);
                    let fetch = || load_player_equipment(client.clone(), id);
                    report(family, slot.refetch(fetch).await);
                }
            }
            QueryFamily::Attendance => {
                for filter in store.attendance.watched_keys() {
                    let slot = store.attendance.slot(&filter);
                    let fetch = || load_attendance(client.clone(), filter);
                    report(family, slot.refetch(fetch).await);
                }
                for id in store.player_attendance.watched_keys() {
                    let slot = store.player_attendance.slot(&id);
                    let fetch = || load_player_attendance(client.clone(), id);
                    report(family, slot.refetch(fetch).await);
                }
            }
            QueryFamily::Statistics => {
                for query in store.summaries.watched_keys() {
                    let slot = store.summaries.slot(&query);
                    let fetch = || load_summary(client.clone(), query.to_params());
                    report(family, slot.refetch(fetch).await);
                }
                for id in store.player_statistics.watched_keys() {
                    let slot = store.player_statistics.slot(&id);
                    let fetch = || load_player_statistics(client.clone(), id);
                    report(family, slot.refetch(fetch).await);
                }
                for id in store.match_statistics.watched_keys() {
                    let slot = store.match_statistics.slot(&id);
                    let fetch = || load_match_statistics(client.clone(), id);
                    report(family, slot.refetch(fetch).await);
                }
            }
        }
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically mark every family stale.
async fn refresh_task(store: Arc<DataStore>, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!("periodic refresh");
                for family in QueryFamily::iter() {
                    store.invalidate(family);
                }
            }
        }
    }
}

/// Refetch subscribed queries whenever their family is invalidated.
async fn refetch_task(
    controller: Controller,
    mut events: broadcast::Receiver<Invalidation>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            event = events.recv() => match event {
                Ok(Invalidation { family, .. }) => controller.refetch_family(family).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "invalidation events lagged, refetching everything");
                    for family in QueryFamily::iter() {
                        controller.refetch_family(family).await;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

/// Process commands from the mpsc channel, routing each to one API call
/// and invalidating the command's families on success.
async fn command_processor_task(
    controller: Controller,
    mut rx: mpsc::Receiver<CommandEnvelope>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = run_command(&controller, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

async fn run_command(controller: &Controller, cmd: Command) -> Result<CommandResult, CoreError> {
    let name = cmd.name();
    let families = cmd.invalidates();
    let client = controller.client().await?;

    match route_command(&client, cmd).await {
        Ok(result) => {
            debug!(command = name, "command succeeded");
            for family in families {
                controller.inner.store.invalidate(*family);
            }
            Ok(result)
        }
        Err(e) => {
            debug!(command = name, error = %e, "command failed");
            Err(e)
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Route a command to its API call.
async fn route_command(client: &ApiClient, cmd: Command) -> Result<CommandResult, CoreError> {
    match cmd {
        // ── Players ──────────────────────────────────────────────
        Command::CreatePlayer(input) => {
            let created = client
                .create_player(&PlayerCreateUpdate::from(&input))
                .await?;
            Ok(CommandResult::Player(created.into()))
        }
        Command::UpdatePlayer { id, input } => {
            let updated = client
                .update_player(&id.to_wire(), &PlayerCreateUpdate::from(&input))
                .await
                .map_err(|e| not_found_as("Player", &id, e))?;
            Ok(CommandResult::Player(updated.into()))
        }
        Command::DeletePlayer { id } => {
            client
                .delete_player(&id.to_wire())
                .await
                .map_err(|e| not_found_as("Player", &id, e))?;
            Ok(CommandResult::Ok)
        }

        // ── Attendance ───────────────────────────────────────────
        Command::RecordAttendance(input) => {
            let created = client
                .create_attendance(&AttendanceCreateUpdate::from(&input))
                .await?;
            Ok(CommandResult::Attendance(created.into()))
        }
        Command::UpdateAttendance { id, input } => {
            let updated = client
                .update_attendance(&id.to_wire(), &AttendanceCreateUpdate::from(&input))
                .await
                .map_err(|e| not_found_as("Attendance", &id, e))?;
            Ok(CommandResult::Attendance(updated.into()))
        }

        // ── Equipment ────────────────────────────────────────────
        Command::CreateEquipment(input) => {
            let created = client
                .create_equipment(&EquipmentCreateUpdate::from(&input))
                .await?;
            Ok(CommandResult::Equipment(created.into()))
        }
        Command::UpdateEquipment { id, input } => {
            let updated = client
                .update_equipment(&id.to_wire(), &EquipmentCreateUpdate::from(&input))
                .await
                .map_err(|e| not_found_as("Equipment", &id, e))?;
            Ok(CommandResult::Equipment(updated.into()))
        }
        Command::DeleteEquipment { id } => {
            client
                .delete_equipment(&id.to_wire())
                .await
                .map_err(|e| not_found_as("Equipment", &id, e))?;
            Ok(CommandResult::Ok)
        }

        // ── Assignments ──────────────────────────────────────────
        Command::AssignEquipment(input) => {
            let body = assignment_body(&input)?;
            let created = client.create_assignment(&body).await?;
            Ok(CommandResult::Assignment(created.into()))
        }
        Command::ReturnEquipment { id } => {
            let ack = client
                .return_assignment(&id.to_wire())
                .await
                .map_err(|e| not_found_as("Assignment", &id, e))?;
            Ok(CommandResult::Message(ack.message))
        }
        Command::UnassignEquipment {
            player_id,
            equipment_id,
        } => {
            let ack = client
                .unassign(&player_id.to_wire(), &equipment_id.to_wire())
                .await
                .map_err(|e| match CoreError::from(e) {
                    CoreError::NotFound { .. } => CoreError::NotFound {
                        entity: "Assignment".into(),
                        identifier: format!("{player_id}/{equipment_id}"),
                    },
                    other => other,
                })?;
            Ok(CommandResult::Message(ack.message))
        }
        Command::RotateEquipment => {
            client.rotate_equipment().await?;
            Ok(CommandResult::Ok)
        }

        // ── Matches ──────────────────────────────────────────────
        Command::CreateMatch(input) => {
            let created = client.create_match(&MatchCreateUpdate::from(&input)).await?;
            Ok(CommandResult::Match(created.into()))
        }
        Command::UpdateMatch { id, input } => {
            let updated = client
                .update_match(&id.to_wire(), &MatchCreateUpdate::from(&input))
                .await
                .map_err(|e| not_found_as("Match", &id, e))?;
            Ok(CommandResult::Match(updated.into()))
        }
        Command::DeleteMatch { id } => {
            client
                .delete_match(&id.to_wire())
                .await
                .map_err(|e| not_found_as("Match", &id, e))?;
            Ok(CommandResult::Ok)
        }

        // ── Statistics ───────────────────────────────────────────
        Command::RecordStatistic(input) => {
            let created = client
                .record_statistic(&StatisticCreate::from(&input))
                .await?;
            Ok(CommandResult::Statistic(created.into()))
        }
        Command::RecordStatistics(inputs) => {
            if inputs.is_empty() {
                return Err(CoreError::Validation {
                    message: "no statistics to record".into(),
                });
            }
            let body: Vec<StatisticCreate> = inputs.iter().map(StatisticCreate::from).collect();
            let created = client.record_statistics(&body).await?;
            Ok(CommandResult::Statistics(
                created.into_iter().map(Statistic::from).collect(),
            ))
        }
    }
}

// ── Loaders ──────────────────────────────────────────────────────

async fn load_players(client: ApiClient) -> Result<Vec<Player>, CoreError> {
    let raw = client.list_players().await?;
    Ok(raw.into_iter().map(Player::from).collect())
}

async fn load_matches(client: ApiClient) -> Result<Vec<Match>, CoreError> {
    let raw = client.list_matches().await?;
    Ok(raw.into_iter().map(Match::from).collect())
}

async fn load_equipment(client: ApiClient) -> Result<Vec<Equipment>, CoreError> {
    let raw = client.list_equipment().await?;
    Ok(raw.into_iter().map(Equipment::from).collect())
}

async fn load_assignments(client: ApiClient) -> Result<Vec<Assignment>, CoreError> {
    let raw = client.list_pending_assignments().await?;
    Ok(raw.into_iter().map(Assignment::from).collect())
}

async fn load_attendance(
    client: ApiClient,
    filter: AttendanceFilter,
) -> Result<Vec<Attendance>, CoreError> {
    let kind = filter.kind.as_ref().map(|k| k.as_wire());
    let raw = client.list_attendance(filter.date, kind).await?;
    Ok(raw.into_iter().map(Attendance::from).collect())
}

async fn load_player_attendance(
    client: ApiClient,
    player_id: EntityId,
) -> Result<Vec<Attendance>, CoreError> {
    let raw = client
        .list_player_attendance(&player_id.to_wire())
        .await
        .map_err(|e| not_found_as("Player", &player_id, e))?;
    Ok(raw.into_iter().map(Attendance::from).collect())
}

async fn load_player_equipment(
    client: ApiClient,
    player_id: EntityId,
) -> Result<Vec<Equipment>, CoreError> {
    let raw = client
        .list_player_equipment(&player_id.to_wire())
        .await
        .map_err(|e| not_found_as("Player", &player_id, e))?;
    Ok(raw.into_iter().map(Equipment::from).collect())
}

async fn load_match(client: ApiClient, match_id: EntityId) -> Result<Match, CoreError> {
    let raw = client
        .get_match(&match_id.to_wire())
        .await
        .map_err(|e| not_found_as("Match", &match_id, e))?;
    Ok(raw.into())
}

async fn load_player_statistics(
    client: ApiClient,
    player_id: EntityId,
) -> Result<StatisticsSummary, CoreError> {
    let raw = client
        .player_statistics(&player_id.to_wire())
        .await
        .map_err(|e| not_found_as("Player", &player_id, e))?;
    Ok(raw.into())
}

async fn load_match_statistics(
    client: ApiClient,
    match_id: EntityId,
) -> Result<MatchStatistics, CoreError> {
    let raw = client
        .match_statistics(&match_id.to_wire())
        .await
        .map_err(|e| not_found_as("Match", &match_id, e))?;
    Ok(raw.into())
}

/// The backend's order is kept as-is.
async fn load_summary(
    client: ApiClient,
    params: SummaryParams,
) -> Result<Vec<StatisticsSummary>, CoreError> {
    let raw = client.statistics_summary(&params).await?;
    Ok(raw.into_iter().map(StatisticsSummary::from).collect())
}

// ── Helpers ──────────────────────────────────────────────────────

fn assignment_body(input: &AssignmentInput) -> Result<AssignmentCreate, CoreError> {
    let player_id = input.player_id.as_ref().ok_or_else(|| CoreError::Validation {
        message: "a player is required".into(),
    })?;
    let equipment_id = input
        .equipment_id
        .as_ref()
        .ok_or_else(|| CoreError::Validation {
            message: "an equipment item is required".into(),
        })?;
    Ok(AssignmentCreate {
        player_id: player_id.to_wire(),
        equipment_id: equipment_id.to_wire(),
        assigned_on: input.assigned_on,
    })
}

/// Name the entity in a 404 instead of the generic "Resource".
fn not_found_as(entity: &str, id: &EntityId, err: plantel_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::NotFound { .. } => CoreError::NotFound {
            entity: entity.into(),
            identifier: id.to_string(),
        },
        other => other,
    }
}

fn report<T>(family: QueryFamily, result: Result<T, CoreError>) {
    if let Err(e) = result {
        warn!(family = %family, error = %e, "background refetch failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_requires_both_ids() {
        let missing_player = AssignmentInput {
            equipment_id: Some(EntityId::Int(3)),
            ..AssignmentInput::default()
        };
        assert!(matches!(
            assignment_body(&missing_player),
            Err(CoreError::Validation { .. })
        ));

        let complete = AssignmentInput {
            player_id: Some(EntityId::Int(1)),
            equipment_id: Some(EntityId::Int(3)),
            assigned_on: None,
        };
        let body = assignment_body(&complete).expect("valid body");
        assert_eq!(body.player_id.to_string(), "1");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = not_found_as(
            "Match",
            &EntityId::Int(42),
            plantel_api::Error::Api {
                status: 404,
                message: "Partido no encontrado".into(),
            },
        );
        assert_eq!(err.to_string(), "Match not found: 42");
    }

    #[tokio::test]
    async fn execute_requires_connection() {
        let url = url::Url::parse("http://localhost:1").expect("url");
        let controller = Controller::new(ControllerConfig::new(url));
        let result = controller.execute(Command::RotateEquipment).await;
        assert!(matches!(result, Err(CoreError::ControllerDisconnected)));
        assert_eq!(
            controller.store().invalidation_count(QueryFamily::Assignments),
            0
        );
    }
}
