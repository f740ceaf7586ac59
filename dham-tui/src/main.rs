//! Dham TUI entry point.

use dham_core::{EventsBackend, RecordId};
use dham_tui::api_client::RestClient;
use dham_tui::config::TuiConfig;
use dham_tui::error::TuiError;
use dham_tui::events::{ListTarget, TuiEvent};
use dham_tui::logging::init_tracing;
use dham_tui::persistence;
use dham_tui::session::Session;
use dham_tui::state::{App, Command, MutationJob};
use dham_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_tracing(&config.log_path)?;

    let session = match Session::load(config.auth.session_path.as_deref()) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "Could not read session, continuing as guest");
            Session::anonymous()
        }
    };
    let backend: Arc<dyn EventsBackend> = Arc::new(RestClient::new(&config, &session)?);
    let preference = config.theme.preference();
    let mut app = App::new(config, backend, preference, session.is_authenticated());

    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => app.restore(&state),
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable UI state"),
    }
    if let Ok((width, _)) = terminal::size() {
        app.on_resize(width);
    }
    tracing::info!(api = %app.config.api_base_url, "Starting Dham TUI");

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    spawn_fetch(&mut app, ListTarget::Public, event_tx.clone());
    spawn_fetch(&mut app, ListTarget::Admin, event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &mut app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.expire_notifications(chrono::Utc::now());
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx) {
                    break;
                }
            }
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "Failed to save UI state");
    }
    tracing::info!("Dham TUI stopped");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

fn spawn_fetch(app: &mut App, target: ListTarget, sender: mpsc::Sender<TuiEvent>) {
    let ticket = app.begin_fetch(target);
    let backend = Arc::clone(&app.backend);
    tokio::spawn(async move {
        let result = backend.list_events().await;
        let _ = sender
            .send(TuiEvent::EventsLoaded {
                target,
                ticket,
                result,
            })
            .await;
    });
}

fn spawn_detail_fetch(app: &App, id: RecordId, sender: mpsc::Sender<TuiEvent>) {
    let backend = Arc::clone(&app.backend);
    tokio::spawn(async move {
        let result = backend.get_event(&id).await;
        let _ = sender.send(TuiEvent::DetailLoaded { id, result }).await;
    });
}

fn spawn_mutation(app: &App, job: MutationJob, sender: mpsc::Sender<TuiEvent>) {
    let backend = Arc::clone(&app.backend);
    let today = app.today;
    tokio::spawn(async move {
        let event = job.run(backend.as_ref(), today).await;
        let _ = sender.send(event).await;
    });
}

/// Returns `true` when the app should exit.
fn handle_event(app: &mut App, event: TuiEvent, sender: &mpsc::Sender<TuiEvent>) -> bool {
    match app.handle_event(event) {
        Command::None => {}
        Command::Quit => return true,
        Command::Fetch(target) => spawn_fetch(app, target, sender.clone()),
        Command::FetchDetail(id) => spawn_detail_fetch(app, id, sender.clone()),
        Command::Mutate(job) => spawn_mutation(app, job, sender.clone()),
    }
    false
}
