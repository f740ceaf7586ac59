//! View rendering dispatch.

pub mod activities;
pub mod admin;
pub mod detail;
pub mod editor;
pub mod events;
pub mod helpers;

pub use helpers::{centered_rect, format_display_date};

use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::{App, InputMode};
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

pub fn render_view(f: &mut Frame<'_>, app: &mut App) {
    let screen = f.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(screen);

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg).fg(app.theme.text)),
        screen,
    );
    render_header(f, app, layout[0]);

    // Narrow terminals show the menu only while the mobile menu is open.
    let show_menu = if app.is_narrow() {
        app.ui.mobile_menu_open
    } else {
        app.ui.sidebar_open
    };
    let body = if show_menu {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(layout[1]);
        render_sidebar(f, app, columns[0]);
        columns[1]
    } else {
        layout[1]
    };

    match app.active_view {
        View::Events => events::render(f, app, body),
        View::EventDetail => detail::render(f, app, body),
        View::SocialActivities => activities::render(f, app, body),
        View::AdminEvents => admin::render(f, app, body),
    }

    render_footer(f, app, layout[2]);

    if app.ui.profile_dropdown_open {
        render_profile(f, app, layout[0]);
    }

    if let Some(request) = &app.pending_delete {
        render_confirm(f, app, &request.prompt());
    }
    let theme = app.theme.clone();
    if let Some(editor) = app.editor.as_mut() {
        editor::render(f, editor, &theme, screen);
    }
    if app.show_help {
        render_help(f, app);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let session = if app.authenticated { "admin" } else { "guest" };
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .block(Block::default().borders(Borders::ALL).title(Span::styled(
            format!("Koleshwar Dham | {} | {}", session, app.ui.theme_class()),
            Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

/// Session dropdown hanging off the right end of the header.
fn render_profile(f: &mut Frame<'_>, app: &App, header: Rect) {
    let width = 40.min(header.width);
    let area = Rect {
        x: header.x + header.width - width,
        y: header.y + header.height,
        width,
        height: 6.min(f.size().height.saturating_sub(header.y + header.height)),
    };
    let session = if app.authenticated {
        "Signed in as admin"
    } else {
        "Browsing as guest"
    };
    let lines = vec![
        Line::styled(session, Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD)),
        Line::raw(format!("API: {}", app.config.api_base_url)),
        Line::raw(format!("Theme: {}", app.ui.theme_class())),
        Line::styled("t theme • Esc close", Style::default().fg(app.theme.text_dim)),
    ];
    f.render_widget(Clear, area);
    let dropdown = Paragraph::new(lines)
        .block(Block::default().title("Profile [p]").borders(Borders::ALL))
        .style(Style::default().bg(app.theme.bg).fg(app.theme.text));
    f.render_widget(dropdown, area);
}

fn render_sidebar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = View::all()
        .iter()
        .map(|view| ListItem::new(view.title()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.active_view.index()));
    let list = List::new(items)
        .block(Block::default().title("Menu [b]").borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match (app.input_mode, app.active_view) {
        (InputMode::Search, _) => "type to search • ↑/↓ suggestions • Enter accept • Esc done",
        (InputMode::StartDate | InputMode::EndDate, _) => "YYYY-MM-DD • Enter/Esc done",
        (_, View::EventDetail) => "Esc back • r reload • ? help • q quit",
        (_, View::AdminEvents) => {
            "j/k move • h/l page • n new • e edit • d delete • / search • ? help • q quit"
        }
        _ => "j/k move • h/l page • Enter open • / search • Tab switch view • ? help • q quit",
    };
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_confirm(f: &mut Frame<'_>, app: &App, prompt: &str) {
    let screen = f.size();
    let area = centered_rect(50, 25, screen);
    f.render_widget(Clear, area);
    let text = vec![
        Line::raw(prompt.to_string()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]),
    ];
    let dialog = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Delete Event")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        )
        .style(Style::default().bg(app.theme.bg).fg(app.theme.text));
    f.render_widget(dialog, area);
}

fn render_help(f: &mut Frame<'_>, app: &App) {
    let screen = f.size();
    let area = centered_rect(60, 70, screen);
    f.render_widget(Clear, area);
    let bindings = [
        ("Tab / 1-3", "switch view"),
        ("j / k", "move selection"),
        ("h / l", "previous / next page"),
        ("Enter", "open event / edit event"),
        ("/", "search by title"),
        ("f / u", "filter from / until date"),
        ("c", "clear filters"),
        ("n / e / d", "new / edit / delete (admin)"),
        ("t", "toggle dark mode"),
        ("b", "toggle menu"),
        ("p", "session details"),
        ("r", "reload"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = bindings
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", keys),
                    Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();
    let help = Paragraph::new(lines)
        .block(Block::default().title("Keys (any key closes)").borders(Borders::ALL))
        .style(Style::default().bg(app.theme.bg).fg(app.theme.text));
    f.render_widget(help, area);
}
