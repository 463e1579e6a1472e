//! Error types for edit sessions.

use super::{Section, SessionEvent, SessionState};
use atelier_framework::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot handle {event:?} while {state:?}")]
    InvalidTransition {
        state: SessionState,
        event: SessionEvent,
    },

    #[error("No section is being edited ({state:?})")]
    NotEditing { state: SessionState },

    #[error("Draft is for {found}, but the open section is {expected}")]
    SectionMismatch { expected: Section, found: Section },

    #[error("Nothing to save for {0}")]
    EmptyDraft(Section),

    /// The save request failed. The draft is kept.
    #[error("Saving {section} failed: {source}")]
    Save { section: Section, source: ApiError },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Edit session closed")]
    Closed,

    #[error("Edit session dropped response channel")]
    Dropped,
}

impl SessionError {
    pub fn requires_login(&self) -> bool {
        match self {
            SessionError::Save { source, .. } | SessionError::Api(source) => source.requires_login(),
            _ => false,
        }
    }
}
