//! The edit-session state machine. [`SessionState::on`] is the only place
//! transitions are decided.

use super::SessionError;
use std::fmt;

/// The part of a product a modal edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Basic,
    Materials,
    Image,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Basic => "basic info",
            Section::Materials => "materials",
            Section::Image => "image",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Showing server data.
    #[default]
    Idle,
    /// A section's form is open; the draft diverges from what is shown.
    Editing(Section),
    /// The save request is in flight; refreshes of the product are ignored.
    Saving(Section),
    /// The save succeeded; the server response is being applied.
    Reconciling(Section),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Open(Section),
    Cancel,
    Submit,
    SaveSucceeded,
    SaveFailed,
    Reconciled,
}

impl SessionState {
    /// Applies `event`, or reports the transition as invalid.
    pub fn on(self, event: SessionEvent) -> Result<SessionState, SessionError> {
        use SessionEvent::*;
        use SessionState::*;

        let next = match (self, event) {
            (Idle | Editing(_), Open(section)) => Editing(section),
            (Editing(_), Cancel) => Idle,
            (Editing(section), Submit) => Saving(section),
            (Saving(section), SaveSucceeded) => Reconciling(section),
            (Saving(section), SaveFailed) => Editing(section),
            (Reconciling(_), Reconciled) => Idle,
            (state, event) => return Err(SessionError::InvalidTransition { state, event }),
        };
        Ok(next)
    }

    /// Whether server refreshes of the product must be ignored.
    pub fn suppresses_refresh(&self) -> bool {
        matches!(self, SessionState::Saving(_) | SessionState::Reconciling(_))
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            SessionState::Idle => None,
            SessionState::Editing(s) | SessionState::Saving(s) | SessionState::Reconciling(s) => {
                Some(*s)
            }
        }
    }
}
