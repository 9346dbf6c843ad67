//! # Key Commands
//!
//! Maps raw key events to the handful of things the screen can do.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    /// Tear the screen down and create it again, starting a fresh load cycle
    Reload,
}

/// Resolve a key press to a command, `None` for unbound keys
pub fn resolve_key(key: &KeyEvent) -> Option<ScreenCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let command = match key.code {
        KeyCode::Char('c') if ctrl => ScreenCommand::Quit,
        KeyCode::Char('f') if ctrl => ScreenCommand::PageDown,
        KeyCode::Char('b') if ctrl => ScreenCommand::PageUp,
        _ if ctrl => return None,
        KeyCode::Char('q') | KeyCode::Esc => ScreenCommand::Quit,
        KeyCode::Char('j') | KeyCode::Down => ScreenCommand::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => ScreenCommand::ScrollUp,
        KeyCode::Char(' ') | KeyCode::PageDown => ScreenCommand::PageDown,
        KeyCode::PageUp => ScreenCommand::PageUp,
        KeyCode::Char('g') | KeyCode::Home => ScreenCommand::Top,
        KeyCode::Char('G') | KeyCode::End => ScreenCommand::Bottom,
        KeyCode::Char('r') => ScreenCommand::Reload,
        _ => return None,
    };
    Some(command)
}
