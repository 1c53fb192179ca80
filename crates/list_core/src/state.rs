//! Explicit application state threaded through every controller handler.

use shared::domain::{Item, ItemCollection, RowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub row: RowId,
    pub item: Item,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Off,
    Editing {
        row: RowId,
        original: Item,
    },
}

/// Entries are kept in display order, so the rendered rows and the persisted
/// collection can never disagree on order.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) entries: Vec<ListEntry>,
    pub(crate) edit: EditMode,
    next_row: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn items(&self) -> ItemCollection {
        self.entries.iter().map(|entry| entry.item.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditMode::Editing { .. })
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.entries.iter().any(|entry| &entry.item == item)
    }

    pub fn entry(&self, row: RowId) -> Option<&ListEntry> {
        self.entries.iter().find(|entry| entry.row == row)
    }

    /// First row showing exactly `text`, in display order.
    pub fn row_for_text(&self, text: &str) -> Option<RowId> {
        self.entries
            .iter()
            .find(|entry| entry.item == *text)
            .map(|entry| entry.row)
    }

    pub(crate) fn position(&self, row: RowId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.row == row)
    }

    pub(crate) fn allocate_row(&mut self) -> RowId {
        self.next_row += 1;
        RowId(self.next_row)
    }
}
