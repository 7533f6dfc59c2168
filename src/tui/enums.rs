//! Enumerations for TUI state management.

use crate::fields::Status;

/// A menu action that needs more input or a pause before returning.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Subflow {
    Add,
    Update,
    ShowAll,
    ShowByStatus(Status),
    Delete,
}

/// State of the menu loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    MenuDisplayed,
    AwaitingInput(Subflow),
    Exiting,
}

impl AppState {
    /// State reached by pressing `key` on the main menu, if the key means anything.
    pub fn on_menu_key(key: char) -> Option<AppState> {
        let next = match key {
            '1' => AppState::AwaitingInput(Subflow::Add),
            '2' => AppState::AwaitingInput(Subflow::Update),
            '3' => AppState::AwaitingInput(Subflow::ShowAll),
            '4' => AppState::AwaitingInput(Subflow::ShowByStatus(Status::Completed)),
            '5' => AppState::AwaitingInput(Subflow::ShowByStatus(Status::InProgress)),
            '6' => AppState::AwaitingInput(Subflow::ShowByStatus(Status::NotCompleted)),
            '7' => AppState::AwaitingInput(Subflow::Delete),
            '8' => AppState::Exiting,
            _ => return None,
        };
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_keys() {
        assert_eq!(AppState::on_menu_key('1'), Some(AppState::AwaitingInput(Subflow::Add)));
        assert_eq!(
            AppState::on_menu_key('5'),
            Some(AppState::AwaitingInput(Subflow::ShowByStatus(Status::InProgress)))
        );
        assert_eq!(AppState::on_menu_key('8'), Some(AppState::Exiting));
        assert_eq!(AppState::on_menu_key('9'), None);
        assert_eq!(AppState::on_menu_key('q'), None);
    }
}
