//! Collaborators the controller drives: the rendered list and the blocking
//! dialogs.

use shared::domain::{Item, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    #[default]
    Add,
    Update,
}

impl SubmitMode {
    pub fn label(self) -> &'static str {
        match self {
            SubmitMode::Add => "Add Item",
            SubmitMode::Update => "Update Item",
        }
    }
}

pub trait ListView {
    fn render_row(&mut self, row: RowId, item: &Item);
    /// Unknown rows are ignored.
    fn remove_row(&mut self, row: RowId);
    fn clear_rows(&mut self);
    fn set_row_visible(&mut self, row: RowId, visible: bool);
    fn set_row_marked(&mut self, row: RowId, marked: bool);
    /// Shows or hides the clear-all button and the filter input together.
    fn set_controls_visible(&mut self, visible: bool);
    fn set_submit_mode(&mut self, mode: SubmitMode);
    fn input_text(&self) -> String;
    fn set_input_text(&mut self, text: &str);
}

/// Synchronous prompts. Both block until the user dismisses them.
pub trait Dialogs {
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    pub row: RowId,
    pub text: String,
    pub visible: bool,
    pub marked: bool,
}

/// In-memory rendition of the list, for hosts that redraw from a model every
/// frame (egui) or print it once (console).
#[derive(Debug, Clone, Default)]
pub struct RetainedView {
    rows: Vec<RowModel>,
    input: String,
    controls_visible: bool,
    submit_mode: SubmitMode,
}

impl RetainedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RowModel] {
        &self.rows
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &RowModel> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn marked_row(&self) -> Option<&RowModel> {
        self.rows.iter().find(|row| row.marked)
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn submit_mode(&self) -> SubmitMode {
        self.submit_mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Direct access for text widgets that edit the buffer in place.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    fn row_mut(&mut self, row: RowId) -> Option<&mut RowModel> {
        self.rows.iter_mut().find(|model| model.row == row)
    }
}

impl ListView for RetainedView {
    fn render_row(&mut self, row: RowId, item: &Item) {
        self.rows.push(RowModel {
            row,
            text: item.to_string(),
            visible: true,
            marked: false,
        });
    }

    fn remove_row(&mut self, row: RowId) {
        self.rows.retain(|model| model.row != row);
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn set_row_visible(&mut self, row: RowId, visible: bool) {
        if let Some(model) = self.row_mut(row) {
            model.visible = visible;
        }
    }

    fn set_row_marked(&mut self, row: RowId, marked: bool) {
        if let Some(model) = self.row_mut(row) {
            model.marked = marked;
        }
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    fn set_submit_mode(&mut self, mode: SubmitMode) {
        self.submit_mode = mode;
    }

    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }
}
