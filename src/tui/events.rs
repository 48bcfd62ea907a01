//! Events flowing through the Elm-architecture event loop.

use crate::api::{CreatedExperience, ExperienceSummary, PendingCompany};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for draft timers, notification TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Browse list fetch finished.
    ExperiencesLoaded(Result<Vec<ExperienceSummary>, String>),
    /// Experience submission finished.
    ExperienceSubmitted(Result<CreatedExperience, String>),
    /// Pending-company registration finished.
    CompanyRegistered(Result<PendingCompany, String>),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusBrowse,
    FocusCompose,
    TabNext,
    TabPrev,

    // Modals
    ShowHelp,
    CloseHelp,

    // Views
    RefreshBrowse,

    // Application
    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Browse,
    Compose,
}

impl Focus {
    pub const ALL: [Focus; 2] = [Focus::Browse, Focus::Compose];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Browse => "Browse",
            Focus::Compose => "Share Experience",
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// A notification as produced by background tasks, before the app
    /// assigns it an id.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_roundtrip() {
        let mut focus = Focus::Browse;
        for _ in 0..Focus::ALL.len() {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Browse);

        for _ in 0..Focus::ALL.len() {
            focus = focus.prev();
        }
        assert_eq!(focus, Focus::Browse);
    }

    #[test]
    fn test_focus_labels_nonempty() {
        for focus in Focus::ALL {
            assert!(!focus.label().is_empty());
        }
    }
}
