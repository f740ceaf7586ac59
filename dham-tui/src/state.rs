//! Application state and view state definitions.
//!
//! The app never performs I/O itself. Key handling returns a [`Command`]
//! that the event loop carries out; results come back as events and are
//! applied here.

use crate::catalog;
use crate::config::TuiConfig;
use crate::events::{ListTarget, MutationKind, TuiEvent};
use crate::keys::{map_key, Action};
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::richtext::TextAreaField;
use crate::theme::Theme;
use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dham_core::{
    Activity, BackendError, BackendResult, ColorPreference, ConfirmedDelete, DeleteRequest,
    EditorField, EventDraft, EventEditor, EventsBackend, FetchOutcome, FetchTicket,
    ListController, ListRecord, Listable, MutationDispatcher, MutationError, MutationOutcome,
    Notice, RecordId, UiState, TECHNICAL_DIFFICULTIES,
};
use std::sync::Arc;

/// Terminal width below which the layout is treated as narrow.
pub const NARROW_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    StartDate,
    EndDate,
}

/// Work the event loop carries out on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Fetch(ListTarget),
    FetchDetail(RecordId),
    Mutate(MutationJob),
}

/// An admin mutation to run off the event loop.
///
/// The job owns everything it needs, so the loop keeps handling keys while
/// the backend answers. Its result comes back as
/// [`TuiEvent::MutationFinished`] and is applied by
/// [`App::apply_mutation_finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationJob {
    Delete(ConfirmedDelete),
    Save(EventDraft),
}

impl MutationJob {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationJob::Delete(_) => MutationKind::Delete,
            MutationJob::Save(_) => MutationKind::Save,
        }
    }

    pub async fn run(self, backend: &dyn EventsBackend, today: NaiveDate) -> TuiEvent {
        let kind = self.kind();
        let dispatcher = MutationDispatcher::new(backend).with_today(today);
        let result = match self {
            MutationJob::Delete(confirmed) => dispatcher.delete(confirmed).await,
            MutationJob::Save(draft) => dispatcher.save(&draft).await,
        };
        TuiEvent::MutationFinished { kind, result }
    }
}

macro_rules! on_active_list {
    ($app:expr, $view:ident => $body:expr) => {
        match $app.active_view {
            View::Events => {
                let $view = &mut $app.public_events;
                $body
            }
            View::SocialActivities => {
                let $view = &mut $app.activities;
                $body
            }
            View::AdminEvents => {
                let $view = &mut $app.admin_events;
                $body
            }
            View::EventDetail => Default::default(),
        }
    };
}

pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub backend: Arc<dyn EventsBackend>,
    pub ui: UiState,
    pub active_view: View,
    pub input_mode: InputMode,

    pub public_events: ListViewState<ListRecord>,
    pub admin_events: ListViewState<ListRecord>,
    pub activities: ListViewState<Activity>,
    pub detail: DetailViewState,

    pub editor: Option<EventEditor<TextAreaField>>,
    pub pending_delete: Option<DeleteRequest>,
    /// Record whose delete is with the backend.
    pub deleting: Option<RecordId>,
    pub show_help: bool,
    pub notifications: Vec<Notification>,

    pub authenticated: bool,
    pub width: u16,
    pub today: NaiveDate,
}

impl App {
    pub fn new(
        config: TuiConfig,
        backend: Arc<dyn EventsBackend>,
        preference: ColorPreference,
        authenticated: bool,
    ) -> Self {
        let listing = config.listing.clone();
        let ui = UiState::from_preference(preference);
        let mut notifications = Vec::new();

        let activities = match catalog::social_activities() {
            Ok(activities) => activities,
            Err(err) => {
                tracing::error!(error = %err, "Bundled activity catalog is unreadable");
                notifications.push(Notification::new(
                    NotificationLevel::Error,
                    "Social activities are unavailable",
                ));
                Vec::new()
            }
        };

        Self {
            theme: Theme::for_dark_mode(ui.dark_mode),
            backend,
            ui,
            active_view: View::Events,
            input_mode: InputMode::Browse,
            public_events: ListViewState::new(
                ListController::new(listing.public_page_size)
                    .with_suggestion_limit(listing.suggestion_limit),
            ),
            admin_events: ListViewState::new(
                ListController::new(listing.admin_page_size)
                    .with_suggestion_limit(listing.suggestion_limit),
            ),
            activities: ListViewState::new(
                ListController::with_records(listing.activities_page_size, activities)
                    .with_suggestion_limit(listing.suggestion_limit),
            ),
            detail: DetailViewState::new(),
            editor: None,
            pending_delete: None,
            deleting: None,
            show_help: false,
            notifications,
            authenticated,
            width: NARROW_WIDTH + 20,
            today: chrono::Local::now().date_naive(),
            config,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn notify_notice(&mut self, notice: Notice) {
        self.notifications.push(Notification::from(notice));
    }

    pub fn expire_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_WIDTH
    }

    pub fn on_resize(&mut self, width: u16) {
        self.width = width;
        self.ui.on_resize(!self.is_narrow());
    }

    pub fn today_string(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    pub fn restore(&mut self, state: &PersistedState) {
        self.active_view = state.active_view.restorable();
        self.ui.dark_mode = state.dark_mode;
        self.theme = Theme::for_dark_mode(self.ui.dark_mode);
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            active_view: self.active_view.restorable(),
            dark_mode: self.ui.dark_mode,
        }
    }

    fn event_list(&mut self, target: ListTarget) -> &mut ListViewState<ListRecord> {
        match target {
            ListTarget::Public => &mut self.public_events,
            ListTarget::Admin => &mut self.admin_events,
        }
    }

    // ------------------------------------------------------------------------
    // Fetch results
    // ------------------------------------------------------------------------

    pub fn begin_fetch(&mut self, target: ListTarget) -> FetchTicket {
        self.event_list(target).list.begin_fetch()
    }

    pub fn apply_events_loaded(
        &mut self,
        target: ListTarget,
        ticket: FetchTicket,
        result: BackendResult<Vec<ListRecord>>,
    ) {
        let view = self.event_list(target);
        match result {
            Ok(records) => {
                if let FetchOutcome::Applied { count } = view.list.complete_fetch(ticket, records) {
                    view.reset_selection();
                    tracing::debug!(?target, count, "Listing refreshed");
                }
            }
            Err(err) => {
                if view.list.fail_fetch(ticket) == FetchOutcome::Stale {
                    return;
                }
                tracing::warn!(?target, error = %err, "Event fetch failed");
                let message = match err {
                    BackendError::Network { .. } => TECHNICAL_DIFFICULTIES.to_string(),
                    BackendError::Application { message } => {
                        format!("Failed to load events: {}", message)
                    }
                };
                self.notify(NotificationLevel::Error, message);
            }
        }
    }

    pub fn open_detail(&mut self) -> Command {
        let Some(record) = self.public_events.selected_record() else {
            return Command::None;
        };
        let id = record.id.clone();
        self.detail.begin(id.clone());
        self.active_view = View::EventDetail;
        Command::FetchDetail(id)
    }

    pub fn apply_detail_loaded(&mut self, id: RecordId, result: BackendResult<ListRecord>) {
        if self.detail.id.as_ref() != Some(&id) {
            return;
        }
        self.detail.loading = false;
        match result {
            Ok(record) => {
                self.detail.record = Some(record);
                self.detail.error = None;
            }
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "Event detail fetch failed");
                self.detail.record = None;
                self.detail.error = Some(match err {
                    BackendError::Application { .. } => "Event not found".to_string(),
                    BackendError::Network { .. } => "Failed to fetch event details".to_string(),
                });
            }
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub fn apply_mutation_finished(
        &mut self,
        kind: MutationKind,
        result: Result<MutationOutcome, MutationError>,
    ) {
        if kind == MutationKind::Delete {
            self.deleting = None;
        }
        match result {
            Ok(outcome) => {
                outcome.apply(&mut self.admin_events.list);
                outcome.apply(&mut self.public_events.list);
                self.admin_events.clamp_selection();
                self.public_events.clamp_selection();
                if kind == MutationKind::Save
                    && self.editor.as_ref().is_some_and(|editor| editor.submitting)
                {
                    self.editor = None;
                }
                self.notify(NotificationLevel::Success, outcome.success_message());
            }
            Err(err) => {
                if kind == MutationKind::Save {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.submitting = false;
                        if let MutationError::Validation(errors) = &err {
                            editor.errors = errors.clone();
                        }
                    }
                }
                self.notify_notice(err.notice());
            }
        }
    }

    /// Apply one loop event and return the follow-up work, if any.
    pub fn handle_event(&mut self, event: TuiEvent) -> Command {
        match event {
            TuiEvent::Input(key) => return self.handle_key(key),
            TuiEvent::Resize { width, .. } => self.on_resize(width),
            TuiEvent::EventsLoaded {
                target,
                ticket,
                result,
            } => self.apply_events_loaded(target, ticket, result),
            TuiEvent::DetailLoaded { id, result } => self.apply_detail_loaded(id, result),
            TuiEvent::MutationFinished { kind, result } => {
                self.apply_mutation_finished(kind, result)
            }
        }
        Command::None
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if key.kind == KeyEventKind::Release {
            return Command::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }
        if self.pending_delete.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.editor.is_some() {
            return self.handle_editor_key(key);
        }
        if self.show_help {
            self.show_help = false;
            return Command::None;
        }
        match self.input_mode {
            InputMode::Browse => match map_key(key) {
                Some(action) => self.handle_action(action),
                None => Command::None,
            },
            mode => {
                let done: bool = on_active_list!(self, view => view.handle_text_key(mode, key));
                if done || self.active_view == View::EventDetail {
                    self.input_mode = InputMode::Browse;
                }
                Command::None
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Command {
        match action {
            Action::Quit => return Command::Quit,
            Action::NextView => self.switch_view(self.active_view.next()),
            Action::PrevView => self.switch_view(self.active_view.previous()),
            Action::SwitchView(index) => {
                if let Some(view) = View::from_index(index) {
                    self.switch_view(view);
                }
            }
            Action::MoveDown => on_active_list!(self, view => view.select_next()),
            Action::MoveUp => on_active_list!(self, view => view.select_previous()),
            Action::NextPage => on_active_list!(self, view => view.next_page()),
            Action::PrevPage => on_active_list!(self, view => view.previous_page()),
            Action::ClearFilters => on_active_list!(self, view => view.clear_filters()),
            Action::OpenSearch => self.enter_input(InputMode::Search),
            Action::EditStartDate => self.enter_input(InputMode::StartDate),
            Action::EditEndDate => self.enter_input(InputMode::EndDate),
            Action::Confirm => match self.active_view {
                View::Events => return self.open_detail(),
                View::AdminEvents => self.begin_edit(),
                View::EventDetail | View::SocialActivities => {}
            },
            Action::NewItem => {
                if self.active_view == View::AdminEvents {
                    self.editor = Some(EventEditor::create(TextAreaField::new()));
                }
            }
            Action::EditItem => {
                if self.active_view == View::AdminEvents {
                    self.begin_edit();
                }
            }
            Action::DeleteItem => {
                if self.active_view == View::AdminEvents {
                    if let Some(record) = self.admin_events.selected_record() {
                        self.pending_delete =
                            Some(DeleteRequest::new(record.id.clone(), record.title.clone()));
                    }
                }
            }
            Action::ToggleDarkMode => {
                self.ui.toggle_dark_mode();
                self.theme = Theme::for_dark_mode(self.ui.dark_mode);
            }
            Action::ToggleSidebar => {
                let narrow = self.is_narrow();
                self.ui.toggle_sidebar(narrow);
            }
            Action::ToggleProfile => self.ui.toggle_profile_dropdown(),
            Action::OpenHelp => self.show_help = true,
            Action::Refresh => return self.refresh_command(),
            Action::Cancel => {
                if self.active_view == View::EventDetail {
                    self.active_view = View::Events;
                } else {
                    on_active_list!(self, view => view.dismiss_suggestions());
                }
                self.ui.close_transients();
            }
        }
        Command::None
    }

    fn switch_view(&mut self, view: View) {
        self.active_view = view;
        self.input_mode = InputMode::Browse;
        self.ui.close_transients();
    }

    fn enter_input(&mut self, mode: InputMode) {
        if self.active_view != View::EventDetail {
            self.input_mode = mode;
        }
    }

    fn begin_edit(&mut self) {
        if let Some(record) = self.admin_events.selected_record() {
            self.editor = Some(EventEditor::edit(record, TextAreaField::new()));
        }
    }

    fn refresh_command(&mut self) -> Command {
        match self.active_view {
            View::Events => Command::Fetch(ListTarget::Public),
            View::AdminEvents => Command::Fetch(ListTarget::Admin),
            View::EventDetail => match &self.detail.id {
                Some(id) => {
                    let id = id.clone();
                    self.detail.begin(id.clone());
                    Command::FetchDetail(id)
                }
                None => Command::None,
            },
            View::SocialActivities => {
                self.notify(NotificationLevel::Info, "Activities are bundled with the app");
                Command::None
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let Some(request) = self.pending_delete.take() else {
                    return Command::None;
                };
                if self.deleting.is_some() {
                    self.notify(NotificationLevel::Info, "A delete is already in progress");
                    return Command::None;
                }
                self.deleting = Some(request.id().clone());
                Command::Mutate(MutationJob::Delete(request.confirm()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                Command::None
            }
            _ => Command::None,
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> Command {
        let Some(editor) = self.editor.as_mut() else {
            return Command::None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') && !editor.submitting {
                let draft = editor.to_draft();
                if let Err(errors) = draft.validate(self.today) {
                    tracing::debug!(fields = errors.len(), "Event draft rejected before dispatch");
                    editor.errors = errors.clone();
                    let notice = MutationError::Validation(errors).notice();
                    self.notify_notice(notice);
                    return Command::None;
                }
                editor.errors = Default::default();
                editor.submitting = true;
                return Command::Mutate(MutationJob::Save(draft));
            }
            return Command::None;
        }
        if editor.submitting {
            return Command::None;
        }
        match key.code {
            KeyCode::Esc => self.editor = None,
            KeyCode::Tab => editor.focus_next(),
            KeyCode::BackTab => editor.focus_previous(),
            _ if editor.focus == EditorField::Detail => {
                editor.detail.input(key);
            }
            KeyCode::Enter => editor.focus_next(),
            KeyCode::Backspace => {
                if let Some(line) = editor.focused_line_mut() {
                    line.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(line) = editor.focused_line_mut() {
                    line.push(c);
                }
            }
            _ => {}
        }
        Command::None
    }
}

// ============================================================================
// VIEW STATE DEFINITIONS
// ============================================================================

/// One listing screen: its controller plus cursor and input buffers.
#[derive(Debug, Clone)]
pub struct ListViewState<R> {
    pub list: ListController<R>,
    /// Row within the current page.
    pub selected: usize,
    pub start_input: String,
    pub end_input: String,
    pub suggestion_cursor: Option<usize>,
}

impl<R: Listable + Clone> ListViewState<R> {
    pub fn new(list: ListController<R>) -> Self {
        Self {
            list,
            selected: 0,
            start_input: String::new(),
            end_input: String::new(),
            suggestion_cursor: None,
        }
    }

    pub fn selected_record(&self) -> Option<&R> {
        self.list.page_slice().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.list.page_slice().len();
        self.selected = if len == 0 { 0 } else { (self.selected + 1) % len };
    }

    pub fn select_previous(&mut self) {
        let len = self.list.page_slice().len();
        self.selected = match (len, self.selected) {
            (0, _) => 0,
            (_, 0) => len - 1,
            (_, index) => index - 1,
        };
    }

    pub fn next_page(&mut self) {
        self.list.next_page();
        self.selected = 0;
    }

    pub fn previous_page(&mut self) {
        self.list.previous_page();
        self.selected = 0;
    }

    pub fn clear_filters(&mut self) {
        self.start_input.clear();
        self.end_input.clear();
        self.list.clear_filters();
        self.reset_selection();
    }

    pub fn dismiss_suggestions(&mut self) {
        self.list.dismiss_suggestions();
        self.suggestion_cursor = None;
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.suggestion_cursor = None;
    }

    /// Keep the cursor on a row that still exists after a splice.
    pub fn clamp_selection(&mut self) {
        let len = self.list.page_slice().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Apply a key typed into one of the filter inputs. Returns `true` once
    /// the input is finished.
    pub fn handle_text_key(&mut self, mode: InputMode, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.dismiss_suggestions();
                true
            }
            KeyCode::Enter => {
                if mode == InputMode::Search {
                    if let Some(index) = self.suggestion_cursor {
                        self.list.accept_suggestion(index);
                        self.reset_selection();
                    }
                    self.dismiss_suggestions();
                }
                true
            }
            KeyCode::Down if mode == InputMode::Search => {
                self.move_suggestion(true);
                false
            }
            KeyCode::Up if mode == InputMode::Search => {
                self.move_suggestion(false);
                false
            }
            KeyCode::Backspace => {
                self.edit_input(mode, |buffer| {
                    buffer.pop();
                });
                false
            }
            KeyCode::Char(c) => {
                let accepted = mode == InputMode::Search || c.is_ascii_digit() || c == '-';
                if accepted {
                    self.edit_input(mode, |buffer| buffer.push(c));
                }
                false
            }
            _ => false,
        }
    }

    fn move_suggestion(&mut self, down: bool) {
        let suggestions = self.list.suggestions();
        if !suggestions.visible || suggestions.items.is_empty() {
            self.suggestion_cursor = None;
            return;
        }
        let last = suggestions.items.len() - 1;
        self.suggestion_cursor = match (self.suggestion_cursor, down) {
            (None, true) => Some(0),
            (None, false) => Some(last),
            (Some(i), true) => Some((i + 1).min(last)),
            (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    // Every keystroke goes straight to the controller, which resets the page.
    fn edit_input(&mut self, mode: InputMode, edit: impl FnOnce(&mut String)) {
        match mode {
            InputMode::Search => {
                let mut term = self.list.search_term().to_string();
                edit(&mut term);
                self.list.set_search_term(term);
            }
            InputMode::StartDate => {
                edit(&mut self.start_input);
                self.list.set_start_date(Some(&self.start_input));
            }
            InputMode::EndDate => {
                edit(&mut self.end_input);
                self.list.set_end_date(Some(&self.end_input));
            }
            InputMode::Browse => return,
        }
        self.reset_selection();
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailViewState {
    pub id: Option<RecordId>,
    pub record: Option<ListRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: RecordId) {
        self.id = Some(id);
        self.record = None;
        self.loading = true;
        self.error = None;
    }
}
