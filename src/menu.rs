//! Context-dependent menu model
//!
//! The visible rows are rebuilt from a small snapshot of session state every
//! time they are needed, so the list can never drift out of sync with the
//! session (e.g. "Resume Game" disappears as soon as the last life is lost).

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Which menu is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuContext {
    Main,
    Paused,
}

/// What selecting a row does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Resume,
    NewGame,
    HighScores,
    CycleScale,
    Exit,
    Continue,
    MainMenu,
}

/// One selectable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
    /// Label reflects live state and changes without the menu being rebuilt
    pub dynamic_label: bool,
}

impl MenuItem {
    fn fixed(label: &str, action: MenuAction) -> Self {
        Self {
            label: label.to_string(),
            action,
            dynamic_label: false,
        }
    }
}

/// The slice of session state the menu depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub has_active_game: bool,
    pub display_scale: u8,
}

impl MenuSnapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            has_active_game: state.has_active_game(),
            display_scale: state.display_scale,
        }
    }
}

/// Rows for `context`, in display order
pub fn build_menu_items(context: MenuContext, snapshot: &MenuSnapshot) -> Vec<MenuItem> {
    match context {
        MenuContext::Main => {
            let mut items = Vec::with_capacity(5);
            if snapshot.has_active_game {
                items.push(MenuItem::fixed("Resume Game", MenuAction::Resume));
            }
            items.push(MenuItem::fixed("New Game", MenuAction::NewGame));
            items.push(MenuItem::fixed("High Scores", MenuAction::HighScores));
            items.push(MenuItem {
                label: format!("Scale: {}x", snapshot.display_scale),
                action: MenuAction::CycleScale,
                dynamic_label: true,
            });
            items.push(MenuItem::fixed("Exit", MenuAction::Exit));
            items
        }
        MenuContext::Paused => vec![
            MenuItem::fixed("Continue", MenuAction::Continue),
            MenuItem::fixed("Main Menu", MenuAction::MainMenu),
        ],
    }
}

/// Cursor one row down, wrapping to the top
pub fn cursor_down(cursor: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (cursor + 1) % len }
}

/// Cursor one row up, wrapping to the bottom
pub fn cursor_up(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + len - 1) % len
    }
}

/// Next display scale in the 1..=max cycle
pub fn next_scale(scale: u8, max: u8) -> u8 {
    (scale % max) + 1
}
