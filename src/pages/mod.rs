//! Per-feature screen controllers.
//!
//! Each controller owns its view state privately and talks to the AI service
//! on demand; nothing is shared across pages except the current product the
//! shell passes in. A request that is in flight when the user moves on simply
//! finishes into state that is no longer rendered.

pub mod dashboard;
pub mod documents;
pub mod hs_code;
pub mod importers;
pub mod packaging;
pub mod pricing;

/// What a screen section is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
