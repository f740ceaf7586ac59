//! Shared presentation state.
//!
//! A single `UiState` is owned by the application and handed to every view,
//! so dark mode and menu state never drift between screens.

use serde::{Deserialize, Serialize};

/// Colour scheme requested by the user or the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPreference {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub mobile_menu_open: bool,
    pub profile_dropdown_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_preference(ColorPreference::Light)
    }
}

impl UiState {
    /// Initial state at mount: follows the colour preference, sidebar open.
    pub fn from_preference(preference: ColorPreference) -> Self {
        Self {
            dark_mode: preference == ColorPreference::Dark,
            sidebar_open: true,
            mobile_menu_open: false,
            profile_dropdown_open: false,
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Narrow layouts have no sidebar; the toggle drives the mobile menu there.
    pub fn toggle_sidebar(&mut self, narrow: bool) {
        if narrow {
            self.mobile_menu_open = !self.mobile_menu_open;
        } else {
            self.sidebar_open = !self.sidebar_open;
        }
    }

    pub fn toggle_profile_dropdown(&mut self) {
        self.profile_dropdown_open = !self.profile_dropdown_open;
    }

    /// A resize to a wide layout closes the mobile menu.
    pub fn on_resize(&mut self, wide: bool) {
        if wide {
            self.mobile_menu_open = false;
        }
    }

    /// Close menus and dropdowns (e.g. on Esc or a click elsewhere).
    pub fn close_transients(&mut self) {
        self.mobile_menu_open = false;
        self.profile_dropdown_open = false;
    }

    pub fn theme_class(&self) -> &'static str {
        if self.dark_mode {
            "dark"
        } else {
            "light"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_follows_preference() {
        assert!(UiState::from_preference(ColorPreference::Dark).dark_mode);
        assert!(!UiState::default().dark_mode);
        assert!(UiState::default().sidebar_open);
    }

    #[test]
    fn test_sidebar_toggle_depends_on_width() {
        let mut ui = UiState::default();
        ui.toggle_sidebar(true);
        assert!(ui.mobile_menu_open);
        assert!(ui.sidebar_open);
        ui.toggle_sidebar(false);
        assert!(!ui.sidebar_open);
        ui.on_resize(true);
        assert!(!ui.mobile_menu_open);
    }

    #[test]
    fn test_dark_mode_toggle_changes_class() {
        let mut ui = UiState::default();
        assert_eq!(ui.theme_class(), "light");
        ui.toggle_dark_mode();
        assert_eq!(ui.theme_class(), "dark");
    }

    #[test]
    fn test_close_transients() {
        let mut ui = UiState::default();
        ui.toggle_profile_dropdown();
        ui.toggle_sidebar(true);
        ui.close_transients();
        assert!(!ui.profile_dropdown_open);
        assert!(!ui.mobile_menu_open);
    }
}
