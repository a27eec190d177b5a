// ── Entity list controllers ──
//
// One generic list/create/update/delete cycle, parameterized by a
// resource marker. Each controller owns its own form dialog state; the
// cache it reads from is shared through the `Controller`.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::command::{Command, CommandResult};
use crate::controller::Controller;
use crate::error::CoreError;
use crate::model::{
    Assignment, AssignmentInput, EntityId, Equipment, EquipmentInput, Match, MatchInput, Player,
    PlayerInput,
};
use crate::store::QueryFamily;

// ── Resource traits ──────────────────────────────────────────────

/// A listable backend collection.
pub trait Resource: Send + Sync + 'static {
    /// Cache family the collection lives in.
    const FAMILY: QueryFamily;
    /// Human-readable name for logs and messages.
    const NAME: &'static str;

    type Item: Clone + Send + Sync + 'static;

    /// Read the collection through the controller cache.
    fn fetch(
        controller: &Controller,
    ) -> impl Future<Output = Result<Arc<Vec<Self::Item>>, CoreError>> + Send;

    fn id(item: &Self::Item) -> &EntityId;
}

/// A collection that can be changed through a form dialog.
pub trait Mutable: Resource {
    type Input: Clone + Default + Send + Sync + 'static;

    fn create_command(input: Self::Input) -> Command;

    /// `Err(Unsupported)` for resources the backend cannot update.
    fn update_command(id: EntityId, input: Self::Input) -> Result<Command, CoreError>;

    fn delete_command(id: EntityId) -> Command;

    /// Pre-fill a form from an existing item.
    fn edit_form(item: &Self::Item) -> Self::Input;
}

// ── Markers ──────────────────────────────────────────────────────

/// `/jugadores`
pub struct Players;

/// `/partidos`
pub struct Matches;

/// `/elementos`
pub struct EquipmentItems;

/// `/asignaciones` (active assignments only).
pub struct Assignments;

impl Resource for Players {
    const FAMILY: QueryFamily = QueryFamily::Players;
    const NAME: &'static str = "player";
    type Item = Player;

    fn fetch(
        controller: &Controller,
    ) -> impl Future<Output = Result<Arc<Vec<Player>>, CoreError>> + Send {
        controller.players()
    }

    fn id(item: &Player) -> &EntityId {
        &item.id
    }
}

impl Mutable for Players {
    type Input = PlayerInput;

    fn create_command(input: PlayerInput) -> Command {
        Command::CreatePlayer(input)
    }

    fn update_command(id: EntityId, input: PlayerInput) -> Result<Command, CoreError> {
        Ok(Command::UpdatePlayer { id, input })
    }

    fn delete_command(id: EntityId) -> Command {
        Command::DeletePlayer { id }
    }

    fn edit_form(item: &Player) -> PlayerInput {
        PlayerInput::from(item)
    }
}

impl Resource for Matches {
    const FAMILY: QueryFamily = QueryFamily::Matches;
    const NAME: &'static str = "match";
    type Item = Match;

    fn fetch(
        controller: &Controller,
    ) -> impl Future<Output = Result<Arc<Vec<Match>>, CoreError>> + Send {
        controller.matches()
    }

    fn id(item: &Match) -> &EntityId {
        &item.id
    }
}

impl Mutable for Matches {
    type Input = MatchInput;

    fn create_command(input: MatchInput) -> Command {
        Command::CreateMatch(input)
    }

    fn update_command(id: EntityId, input: MatchInput) -> Result<Command, CoreError> {
        Ok(Command::UpdateMatch { id, input })
    }

    fn delete_command(id: EntityId) -> Command {
        Command::DeleteMatch { id }
    }

    fn edit_form(item: &Match) -> MatchInput {
        MatchInput::from(item)
    }
}

impl Resource for EquipmentItems {
    const FAMILY: QueryFamily = QueryFamily::Equipment;
    const NAME: &'static str = "equipment";
    type Item = Equipment;

    fn fetch(
        controller: &Controller,
    ) -> impl Future<Output = Result<Arc<Vec<Equipment>>, CoreError>> + Send {
        controller.equipment()
    }

    fn id(item: &Equipment) -> &EntityId {
        &item.id
    }
}

impl Mutable for EquipmentItems {
    type Input = EquipmentInput;

    fn create_command(input: EquipmentInput) -> Command {
        Command::CreateEquipment(input)
    }

    fn update_command(id: EntityId, input: EquipmentInput) -> Result<Command, CoreError> {
        Ok(Command::UpdateEquipment { id, input })
    }

    fn delete_command(id: EntityId) -> Command {
        Command::DeleteEquipment { id }
    }

    fn edit_form(item: &Equipment) -> EquipmentInput {
        EquipmentInput::from(item)
    }
}

impl Resource for Assignments {
    const FAMILY: QueryFamily = QueryFamily::Assignments;
    const NAME: &'static str = "assignment";
    type Item = Assignment;

    fn fetch(
        controller: &Controller,
    ) -> impl Future<Output = Result<Arc<Vec<Assignment>>, CoreError>> + Send {
        controller.assignments()
    }

    fn id(item: &Assignment) -> &EntityId {
        &item.id
    }
}

impl Mutable for Assignments {
    type Input = AssignmentInput;

    fn create_command(input: AssignmentInput) -> Command {
        Command::AssignEquipment(input)
    }

    fn update_command(_id: EntityId, _input: AssignmentInput) -> Result<Command, CoreError> {
        Err(CoreError::Unsupported {
            operation: "update assignment (return it and assign again)".into(),
        })
    }

    /// Deleting an assignment marks it returned.
    fn delete_command(id: EntityId) -> Command {
        Command::ReturnEquipment { id }
    }

    fn edit_form(item: &Assignment) -> AssignmentInput {
        AssignmentInput {
            player_id: Some(item.player_id.clone()),
            equipment_id: Some(item.equipment_id.clone()),
            assigned_on: item.assigned_on,
        }
    }
}

// ── Dialog state machine ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(EntityId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<I> {
    Closed,
    Open { mode: DialogMode, form: I },
}

/// Outcome of the last submit.
#[derive(Debug, Clone)]
pub enum MutationState {
    Idle,
    Pending,
    Succeeded,
    Failed(CoreError),
}

impl MutationState {
    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Form dialog for one entity type.
#[derive(Debug, Clone)]
pub struct FormDialog<I> {
    state: DialogState<I>,
    mutation: MutationState,
}

impl<I: Clone + Default> FormDialog<I> {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            mutation: MutationState::Idle,
        }
    }

    pub fn open_create(&mut self) {
        self.state = DialogState::Open {
            mode: DialogMode::Create,
            form: I::default(),
        };
        self.mutation = MutationState::Idle;
    }

    pub fn open_edit(&mut self, id: EntityId, form: I) {
        self.state = DialogState::Open {
            mode: DialogMode::Edit(id),
            form,
        };
        self.mutation = MutationState::Idle;
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
        self.mutation = MutationState::Idle;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn state(&self) -> &DialogState<I> {
        &self.state
    }

    pub fn mode(&self) -> Option<&DialogMode> {
        match &self.state {
            DialogState::Open { mode, .. } => Some(mode),
            DialogState::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&I> {
        match &self.state {
            DialogState::Open { form, .. } => Some(form),
            DialogState::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut I> {
        match &mut self.state {
            DialogState::Open { form, .. } => Some(form),
            DialogState::Closed => None,
        }
    }

    pub fn mutation(&self) -> &MutationState {
        &self.mutation
    }

    /// Snapshot the open form and mark the mutation pending.
    fn begin_submit(&mut self) -> Result<(DialogMode, I), CoreError> {
        match &self.state {
            DialogState::Open { mode, form } => {
                let submitted = (mode.clone(), form.clone());
                self.mutation = MutationState::Pending;
                Ok(submitted)
            }
            DialogState::Closed => Err(CoreError::Validation {
                message: "no form is open".into(),
            }),
        }
    }

    /// Success closes the dialog; failure keeps it open with the error.
    fn finish_submit<T>(&mut self, result: &Result<T, CoreError>) {
        match result {
            Ok(_) => {
                self.state = DialogState::Closed;
                self.mutation = MutationState::Succeeded;
            }
            Err(e) => self.mutation = MutationState::Failed(e.clone()),
        }
    }
}

impl<I: Clone + Default> Default for FormDialog<I> {
    fn default() -> Self {
        Self::new()
    }
}

// ── EntityController ─────────────────────────────────────────────

/// List view plus form dialog for one resource.
pub struct EntityController<R: Mutable> {
    controller: Controller,
    dialog: FormDialog<R::Input>,
    _resource: PhantomData<R>,
}

impl<R: Mutable> EntityController<R> {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            dialog: FormDialog::new(),
            _resource: PhantomData,
        }
    }

    /// The whole collection, refetched after any invalidation.
    pub async fn list(&self) -> Result<Arc<Vec<R::Item>>, CoreError> {
        R::fetch(&self.controller).await
    }

    pub fn dialog(&self) -> &FormDialog<R::Input> {
        &self.dialog
    }

    pub fn open_create(&mut self) {
        self.dialog.open_create();
    }

    pub fn open_edit(&mut self, item: &R::Item) {
        self.dialog.open_edit(R::id(item).clone(), R::edit_form(item));
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Input> {
        self.dialog.form_mut()
    }

    pub fn close(&mut self) {
        self.dialog.close();
    }

    /// Submit the open form as a create or an update.
    ///
    /// The round trip completes before anything changes: no optimistic
    /// update, no retry.
    pub async fn submit(&mut self) -> Result<CommandResult, CoreError> {
        let (mode, form) = self.dialog.begin_submit()?;
        let command = match mode {
            DialogMode::Create => Ok(R::create_command(form)),
            DialogMode::Edit(id) => R::update_command(id, form),
        };
        let result = match command {
            Ok(command) => self.controller.execute(command).await,
            Err(e) => Err(e),
        };
        self.dialog.finish_submit(&result);
        debug!(resource = R::NAME, ok = result.is_ok(), "form submitted");
        result
    }

    /// Delete (or, for assignments, return) one item. Confirmation is the
    /// caller's job.
    pub async fn delete(&self, id: EntityId) -> Result<CommandResult, CoreError> {
        self.controller.execute(R::delete_command(id)).await
    }
}

impl EntityController<Assignments> {
    /// Ask the backend to rotate equipment among active players.
    ///
    /// On success the assignments cache is stale, so the next `list()`
    /// replaces the whole collection.
    pub async fn rotate(&self) -> Result<(), CoreError> {
        self.controller.execute(Command::RotateEquipment).await?;
        Ok(())
    }
}
