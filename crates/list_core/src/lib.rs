//! List controller: keeps the persisted collection, the rendered rows and the
//! edit mode in step while reacting to UI events.

use anyhow::Result;
use shared::{
    domain::{Item, ItemCollection, RowId},
    error::ListError,
};
use storage::{ItemStore, KeyValueStore};

pub mod config;
pub mod events;
pub mod state;
pub mod view;

pub use events::{ListEvent, Outcome, RowTarget};
pub use state::{AppState, EditMode, ListEntry};
pub use view::{Dialogs, ListView, RetainedView, RowModel, SubmitMode};

pub const CONFIRM_REMOVE_MESSAGE: &str = "Are you sure?";

pub struct ListController<S, V, D> {
    store: ItemStore<S>,
    view: V,
    dialogs: D,
    storage_key: String,
}

impl<S: KeyValueStore, V: ListView, D: Dialogs> ListController<S, V, D> {
    pub fn new(store: S, view: V, dialogs: D, storage_key: impl Into<String>) -> Self {
        Self {
            store: ItemStore::new(store),
            view,
            dialogs,
            storage_key: storage_key.into(),
        }
    }

    pub fn store(&self) -> &ItemStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn handle(&mut self, state: &mut AppState, event: ListEvent) -> Result<Outcome> {
        tracing::debug!(event = event.name(), "dispatching list event");
        match event {
            ListEvent::Load => self.load(state),
            ListEvent::Submit { text } => self.submit(state, &text),
            ListEvent::RowActivated { row, target } => self.activate_row(state, row, target),
            ListEvent::ClearAll => self.clear_all(state),
            ListEvent::Filter { query } => Ok(self.filter(state, &query)),
        }
    }

    /// Replaces whatever is rendered with the persisted collection.
    pub fn load(&mut self, state: &mut AppState) -> Result<Outcome> {
        let items = self
            .store
            .load_items(&self.storage_key)?
            .unwrap_or_default();

        state.entries.clear();
        state.edit = EditMode::Off;
        self.view.clear_rows();
        for item in items {
            let row = state.allocate_row();
            self.view.render_row(row, &item);
            state.entries.push(ListEntry { row, item });
        }

        self.reset_ui(state);
        tracing::info!(count = state.len(), key = %self.storage_key, "loaded items");
        Ok(Outcome::Loaded { count: state.len() })
    }

    pub fn submit(&mut self, state: &mut AppState, text: &str) -> Result<Outcome> {
        let item = match Item::new(text) {
            Ok(item) => item,
            Err(err) => return Ok(self.reject(err)),
        };

        let replaced_position = match &state.edit {
            EditMode::Editing { row, original } => state.position(*row).or_else(|| {
                state
                    .entries
                    .iter()
                    .position(|entry| &entry.item == original)
            }),
            EditMode::Off => {
                if state.contains(&item) {
                    return Ok(self.reject(ListError::DuplicateItem(item.into())));
                }
                None
            }
        };

        let mut next: ItemCollection = state.items();
        if let Some(position) = replaced_position {
            next.remove(position);
        }
        next.push(item.clone());
        self.persist(&next)?;

        state.edit = EditMode::Off;
        let previous = replaced_position.map(|position| state.entries.remove(position));
        let row = state.allocate_row();
        state.entries.push(ListEntry {
            row,
            item: item.clone(),
        });

        if let Some(previous) = &previous {
            self.view.remove_row(previous.row);
        }
        self.view.render_row(row, &item);
        self.reset_ui(state);

        match previous {
            Some(previous) => {
                tracing::info!(from = %previous.item, to = %item, "replaced item");
                Ok(Outcome::Replaced {
                    previous: previous.item,
                    row,
                    item,
                })
            }
            None => {
                tracing::info!(item = %item, "added item");
                Ok(Outcome::Added { row, item })
            }
        }
    }

    pub fn activate_row(
        &mut self,
        state: &mut AppState,
        row: RowId,
        target: RowTarget,
    ) -> Result<Outcome> {
        match target {
            RowTarget::RemoveControl => self.remove(state, row),
            RowTarget::Body => Ok(self.enter_edit_mode(state, row)),
        }
    }

    pub fn enter_edit_mode(&mut self, state: &mut AppState, row: RowId) -> Outcome {
        let Some(item) = state.entry(row).map(|entry| entry.item.clone()) else {
            tracing::warn!(row = row.0, "edit requested for unknown row");
            return Outcome::Ignored;
        };

        for entry in &state.entries {
            self.view.set_row_marked(entry.row, entry.row == row);
        }
        self.view.set_submit_mode(SubmitMode::Update);
        self.view.set_input_text(item.as_str());
        state.edit = EditMode::Editing {
            row,
            original: item.clone(),
        };

        Outcome::EditStarted { row, item }
    }

    /// Removes every entry whose text equals the row's text, after the user
    /// confirms.
    pub fn remove(&mut self, state: &mut AppState, row: RowId) -> Result<Outcome> {
        let Some(item) = state.entry(row).map(|entry| entry.item.clone()) else {
            tracing::warn!(row = row.0, "remove requested for unknown row");
            return Ok(Outcome::Ignored);
        };

        if !self.dialogs.confirm(CONFIRM_REMOVE_MESSAGE) {
            tracing::debug!(item = %item, "remove declined");
            return Ok(Outcome::RemoveDeclined);
        }

        let next: ItemCollection = state
            .entries
            .iter()
            .filter(|entry| entry.item != item)
            .map(|entry| entry.item.clone())
            .collect();
        self.persist(&next)?;

        let removed_rows: Vec<RowId> = state
            .entries
            .iter()
            .filter(|entry| entry.item == item)
            .map(|entry| entry.row)
            .collect();
        state.entries.retain(|entry| entry.item != item);

        for removed in &removed_rows {
            self.view.remove_row(*removed);
        }
        self.reset_ui(state);

        tracing::info!(item = %item, count = removed_rows.len(), "removed item");
        Ok(Outcome::Removed {
            item,
            count: removed_rows.len(),
        })
    }

    /// Drops the persisted record entirely rather than storing an empty list.
    pub fn clear_all(&mut self, state: &mut AppState) -> Result<Outcome> {
        self.store.delete_items(&self.storage_key)?;

        state.entries.clear();
        self.view.clear_rows();
        self.reset_ui(state);

        tracing::info!(key = %self.storage_key, "cleared all items");
        Ok(Outcome::Cleared)
    }

    pub fn filter(&mut self, state: &AppState, query: &str) -> Outcome {
        let mut visible = 0;
        for entry in &state.entries {
            let shown = entry.item.matches_filter(query);
            if shown {
                visible += 1;
            }
            self.view.set_row_visible(entry.row, shown);
        }
        Outcome::Filtered { visible }
    }

    /// Runs after every mutation and is the only place edit mode is cleared
    /// outside of a successful submit.
    fn reset_ui(&mut self, state: &mut AppState) {
        self.view.set_input_text("");
        self.view.set_controls_visible(!state.is_empty());
        self.view.set_submit_mode(SubmitMode::Add);
        if let EditMode::Editing { row, .. } = std::mem::take(&mut state.edit) {
            self.view.set_row_marked(row, false);
        }
    }

    fn reject(&mut self, err: ListError) -> Outcome {
        tracing::debug!(%err, "rejected submit");
        self.dialogs.alert(&err.alert_message());
        Outcome::Rejected(err)
    }

    fn persist(&mut self, items: &ItemCollection) -> Result<()> {
        self.store.save_items(&self.storage_key, items)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
