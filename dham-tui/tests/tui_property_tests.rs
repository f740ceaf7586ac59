use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use dham_core::{ColorPreference, NoticeLevel, PageSize};
use dham_tui::config::{
    preference_from_colorfgbg, AuthConfig, ConfigError, ListingConfig, ThemeConfig, ThemeMode,
    TuiConfig,
};
use dham_tui::keys::{map_key, Action};
use dham_tui::nav::View;
use dham_tui::notifications::{AutoClose, Notification, NotificationLevel};
use dham_tui::theme::{event_date_color, notification_color, Theme};
use proptest::prelude::*;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:4000/api".to_string(),
        request_timeout_ms: 5_000,
        tick_rate_ms: 250,
        persistence_path: "tmp/dham-tui.json".into(),
        log_path: "tmp/dham-tui.log".into(),
        auth: AuthConfig {
            api_key: "test-key".to_string(),
            session_path: None,
        },
        listing: ListingConfig {
            public_page_size: PageSize::new(3).unwrap(),
            admin_page_size: PageSize::new(5).unwrap(),
            activities_page_size: PageSize::new(6).unwrap(),
            suggestion_limit: 5,
        },
        theme: ThemeConfig {
            mode: ThemeMode::System,
        },
    }
}

const SAMPLE_TOML: &str = r#"
api_base_url = "https://koleshwardham.org/api"
request_timeout_ms = 8000
tick_rate_ms = 250
persistence_path = "state/dham-tui.json"
log_path = "state/dham-tui.log"

[auth]
api_key = "public-key"

[listing]
public_page_size = 3
admin_page_size = 5
activities_page_size = 6
suggestion_limit = 5

[theme]
mode = "dark"
"#;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn config_parses_and_validates() {
    let config = TuiConfig::parse(SAMPLE_TOML).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.listing.public_page_size.get(), 3);
    assert_eq!(config.listing.activities_page_size.get(), 6);
    assert_eq!(config.theme.preference(), ColorPreference::Dark);
    assert!(config.auth.session_path.is_none());
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dham-tui.toml");
    std::fs::write(&path, SAMPLE_TOML).unwrap();
    let config = TuiConfig::from_path(&path).unwrap();
    assert_eq!(config.api_base_url, "https://koleshwardham.org/api");

    let missing = dir.path().join("missing.toml");
    assert!(matches!(TuiConfig::from_path(&missing), Err(ConfigError::Io(_))));
}

#[test]
fn config_rejects_zero_page_size_at_parse() {
    let toml = SAMPLE_TOML.replace("admin_page_size = 5", "admin_page_size = 0");
    assert!(matches!(TuiConfig::parse(&toml), Err(ConfigError::Parse(_))));
}

#[test]
fn config_rejects_unknown_fields() {
    let toml = format!("{}\nrefresh_interval_ms = 100\n", SAMPLE_TOML);
    assert!(TuiConfig::parse(&toml).is_err());
}

#[test]
fn config_requires_api_key() {
    let mut config = base_config();
    config.auth.api_key = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "auth.api_key", .. })
    ));
}

#[test]
fn config_requires_http_url() {
    let mut config = base_config();
    config.api_base_url = "ftp://koleshwardham.org".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_zero_suggestion_limit() {
    let mut config = base_config();
    config.listing.suggestion_limit = 0;
    assert!(config.validate().is_err());
}

proptest! {
    #[test]
    fn config_timeouts_must_be_positive(timeout in 0u64..10_000, tick in 0u64..1_000) {
        let mut config = base_config();
        config.request_timeout_ms = timeout;
        config.tick_rate_ms = tick;
        prop_assert_eq!(config.validate().is_ok(), timeout > 0 && tick > 0);
    }

    #[test]
    fn colorfgbg_dark_backgrounds(fg in 0u8..16, bg in 0u8..16) {
        let value = format!("{};{}", fg, bg);
        let expected = if bg <= 6 || bg == 8 {
            ColorPreference::Dark
        } else {
            ColorPreference::Light
        };
        prop_assert_eq!(preference_from_colorfgbg(Some(&value)), expected);
    }
}

// ============================================================================
// KEYS AND NAVIGATION
// ============================================================================

proptest! {
    #[test]
    fn keybinding_digit_switches_view(digit in 0u8..=9u8) {
        let ch = char::from(b'0' + digit);
        let action = map_key(press(KeyCode::Char(ch)));
        let expected = match ch {
            '1'..='9' => Some(Action::SwitchView((digit - 1) as usize)),
            _ => None,
        };
        prop_assert_eq!(action, expected);
    }

    #[test]
    fn navigation_keys_consistent(use_vim in prop::bool::ANY) {
        let (up, down, left, right) = if use_vim {
            (KeyCode::Char('k'), KeyCode::Char('j'), KeyCode::Char('h'), KeyCode::Char('l'))
        } else {
            (KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right)
        };
        prop_assert_eq!(map_key(press(up)), Some(Action::MoveUp));
        prop_assert_eq!(map_key(press(down)), Some(Action::MoveDown));
        prop_assert_eq!(map_key(press(left)), Some(Action::PrevPage));
        prop_assert_eq!(map_key(press(right)), Some(Action::NextPage));
    }

    #[test]
    fn all_action_keys_mapped(key_char in "[qfucnedtbpr?/]") {
        let ch = key_char.chars().next().unwrap();
        prop_assert!(map_key(press(KeyCode::Char(ch))).is_some());
    }

    #[test]
    fn view_cycle_returns_home(steps in 0usize..12) {
        let mut view = View::Events;
        for _ in 0..steps {
            view = view.next();
        }
        for _ in 0..steps {
            view = view.previous();
        }
        prop_assert_eq!(view, View::Events);
    }
}

#[test]
fn control_keys_quit_and_refresh() {
    let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
    assert_eq!(map_key(ctrl('c')), Some(Action::Quit));
    assert_eq!(map_key(ctrl('r')), Some(Action::Refresh));
    assert_eq!(map_key(ctrl('x')), None);
}

#[test]
fn detail_view_is_not_a_tab() {
    assert!(!View::all().contains(&View::EventDetail));
    assert_eq!(View::EventDetail.index(), View::Events.index());
    assert_eq!(View::EventDetail.restorable(), View::Events);
}

// ============================================================================
// THEME AND NOTIFICATIONS
// ============================================================================

#[test]
fn notification_colors_follow_level() {
    let theme = Theme::dark();
    assert_eq!(notification_color(NotificationLevel::Error, &theme), theme.error);
    assert_eq!(notification_color(NotificationLevel::Warning, &theme), theme.warning);
    assert_eq!(notification_color(NotificationLevel::Info, &theme), theme.info);
    assert_eq!(notification_color(NotificationLevel::Success, &theme), theme.success);
}

#[test]
fn past_events_are_dimmed() {
    let theme = Theme::light();
    assert_eq!(event_date_color("2025-01-14", "2025-01-15", &theme), theme.text_dim);
    assert_eq!(event_date_color("2025-01-15", "2025-01-15", &theme), theme.primary);
    assert_eq!(event_date_color("2025-03-05", "2025-01-15", &theme), theme.primary);
}

#[test]
fn notifications_close_by_level() {
    let now = Utc::now();
    let success = Notification::new(NotificationLevel::Success, "Saved");
    assert_eq!(success.auto_close, AutoClose::Short);
    assert!(!success.is_expired(success.created_at + Duration::seconds(1)));
    assert!(success.is_expired(success.created_at + Duration::seconds(3)));

    let error = Notification::from(dham_core::Notice::new(NoticeLevel::Error, "Failed"));
    assert_eq!(error.level, NotificationLevel::Error);
    assert_eq!(error.auto_close, AutoClose::Long);
    assert!(!error.is_expired(now));
}
