//! Dispatch of collected UI events into the list controller.

use list_core::{AppState, Dialogs, ListController, ListEvent, ListView, Outcome};
use storage::KeyValueStore;

/// Runs one event to completion. Store failures land in `status`; validation
/// rejections were already shown as an alert by the controller.
pub fn dispatch_list_event<S, V, D>(
    controller: &mut ListController<S, V, D>,
    state: &mut AppState,
    event: ListEvent,
    status: &mut Option<String>,
) -> Option<Outcome>
where
    S: KeyValueStore,
    V: ListView,
    D: Dialogs,
{
    let event_name = event.name();
    match controller.handle(state, event) {
        Ok(outcome) => {
            tracing::debug!(event = event_name, ?outcome, "handled list event");
            if !matches!(outcome, Outcome::Filtered { .. } | Outcome::Ignored) {
                *status = None;
            }
            Some(outcome)
        }
        Err(err) => {
            tracing::error!(event = event_name, error = %format!("{err:#}"), "list event failed");
            *status = Some(format!("Could not update the list: {err:#}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use list_core::RetainedView;
    use storage::MemoryStore;

    struct AlwaysYes;

    impl Dialogs for AlwaysYes {
        fn confirm(&mut self, _message: &str) -> bool {
            true
        }

        fn alert(&mut self, _message: &str) {}
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("store is read-only")
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            anyhow::bail!("store is read-only")
        }
    }

    #[test]
    fn store_failure_is_reported_in_status() {
        let mut controller =
            ListController::new(ReadOnlyStore, RetainedView::new(), AlwaysYes, "items");
        let mut state = AppState::new();
        let mut status = None;

        let outcome = dispatch_list_event(
            &mut controller,
            &mut state,
            ListEvent::Submit {
                text: "Milk".into(),
            },
            &mut status,
        );

        assert!(outcome.is_none());
        let status = status.expect("status message");
        assert!(status.contains("store is read-only"), "{status}");
    }

    #[test]
    fn successful_mutation_clears_previous_status() {
        let mut controller =
            ListController::new(MemoryStore::new(), RetainedView::new(), AlwaysYes, "items");
        let mut state = AppState::new();
        let mut status = Some("old failure".to_string());

        let outcome = dispatch_list_event(
            &mut controller,
            &mut state,
            ListEvent::Submit {
                text: "Milk".into(),
            },
            &mut status,
        );

        assert!(matches!(outcome, Some(Outcome::Added { .. })));
        assert_eq!(status, None);
    }
}
