use thiserror::Error;

/// Validation failures surfaced to the user as a blocking alert.
///
/// Neither kind is fatal: the operation that produced it is aborted before any
/// mutation, so collection, store, view and edit mode are left as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("Please add an item")]
    EmptyInput,
    #[error("That item is already on the list")]
    DuplicateItem(String),
}

impl ListError {
    pub fn alert_message(&self) -> String {
        self.to_string()
    }
}
