//! Tagged UI events fed into the controller and the outcomes it reports.

use shared::{
    domain::{Item, RowId},
    error::ListError,
};

/// Which part of a row the user activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Body,
    RemoveControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Load,
    Submit { text: String },
    RowActivated { row: RowId, target: RowTarget },
    ClearAll,
    Filter { query: String },
}

impl ListEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ListEvent::Load => "load",
            ListEvent::Submit { .. } => "submit",
            ListEvent::RowActivated {
                target: RowTarget::Body,
                ..
            } => "edit_row",
            ListEvent::RowActivated {
                target: RowTarget::RemoveControl,
                ..
            } => "remove_row",
            ListEvent::ClearAll => "clear_all",
            ListEvent::Filter { .. } => "filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded { count: usize },
    Added { row: RowId, item: Item },
    Replaced { previous: Item, row: RowId, item: Item },
    /// Validation failed; the alert was shown and nothing changed.
    Rejected(ListError),
    EditStarted { row: RowId, item: Item },
    Removed { item: Item, count: usize },
    RemoveDeclined,
    Cleared,
    Filtered { visible: usize },
    /// The event referred to a row that is no longer rendered.
    Ignored,
}
