use list_core::Dialogs;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const DIALOG_TITLE: &str = "Shopping List";

/// Native modal dialogs. Both calls block the UI thread until dismissed.
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(DIALOG_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::OkCancel)
            .show();
        matches!(result, MessageDialogResult::Ok | MessageDialogResult::Yes)
    }

    fn alert(&mut self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(DIALOG_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
