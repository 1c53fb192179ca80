//! UI layer for the desktop list: app shell and native dialogs.

pub mod app;
pub mod dialogs;

pub use app::{ItemListApp, StartupConfig};
