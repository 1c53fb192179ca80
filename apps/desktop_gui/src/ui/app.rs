use std::path::PathBuf;

use eframe::egui;
use list_core::{
    config::Settings, AppState, ListController, ListEvent, RetainedView, RowTarget, SubmitMode,
};
use shared::domain::RowId;
use storage::FileStore;

use crate::controller::orchestration::dispatch_list_event;
use crate::ui::dialogs::NativeDialogs;

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub data_dir: Option<PathBuf>,
    pub storage_key: Option<String>,
}

impl StartupConfig {
    /// Command-line values win over the loaded settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(key) = self.storage_key.as_ref().filter(|key| !key.trim().is_empty()) {
            settings.storage_key = key.clone();
        }
        settings
    }
}

pub type GuiController = ListController<FileStore, RetainedView, NativeDialogs>;

const ADD_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);
const UPDATE_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x22, 0x8b, 0x22);
const EDIT_MARK_COLOR: egui::Color32 = egui::Color32::from_rgb(0xcc, 0xcc, 0xcc);

struct RowSnapshot {
    row: RowId,
    text: String,
    marked: bool,
}

pub struct ItemListApp {
    controller: GuiController,
    state: AppState,
    filter_query: String,
    status: Option<String>,
}

impl ItemListApp {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store = FileStore::open(settings.store_path())?;
        let controller = ListController::new(
            store,
            RetainedView::new(),
            NativeDialogs,
            settings.storage_key.clone(),
        );

        let mut app = Self {
            controller,
            state: AppState::new(),
            filter_query: String::new(),
            status: None,
        };
        app.dispatch(ListEvent::Load);
        Ok(app)
    }

    fn dispatch(&mut self, event: ListEvent) {
        dispatch_list_event(&mut self.controller, &mut self.state, event, &mut self.status);
    }

    fn show_form(&mut self, ui: &mut egui::Ui, events: &mut Vec<ListEvent>) {
        let mode = self.controller.view().submit_mode();
        ui.horizontal(|ui| {
            let input = egui::TextEdit::singleline(self.controller.view_mut().input_mut())
                .hint_text("Enter Item")
                .desired_width(ui.available_width() - 120.0);
            let response = ui.add(input);
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let fill = match mode {
                SubmitMode::Add => ADD_BUTTON_FILL,
                SubmitMode::Update => UPDATE_BUTTON_FILL,
            };
            let button = egui::Button::new(
                egui::RichText::new(mode.label()).color(egui::Color32::WHITE),
            )
            .fill(fill);
            if ui.add(button).clicked() || entered {
                events.push(ListEvent::Submit {
                    text: self.controller.view().input().to_string(),
                });
            }
        });
    }

    fn show_filter(&mut self, ui: &mut egui::Ui, events: &mut Vec<ListEvent>) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.filter_query)
                .hint_text("Filter Items")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            events.push(ListEvent::Filter {
                query: self.filter_query.clone(),
            });
        }
    }

    fn show_rows(&self, ui: &mut egui::Ui, events: &mut Vec<ListEvent>) {
        let rows: Vec<RowSnapshot> = self
            .controller
            .view()
            .visible_rows()
            .map(|model| RowSnapshot {
                row: model.row,
                text: model.text.clone(),
                marked: model.marked,
            })
            .collect();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for snapshot in rows {
                ui.horizontal(|ui| {
                    let mut text = egui::RichText::new(&snapshot.text).strong();
                    if snapshot.marked {
                        text = text.color(EDIT_MARK_COLOR);
                    }
                    let label = ui.add(egui::Label::new(text).sense(egui::Sense::click()));
                    if label.clicked() {
                        events.push(ListEvent::RowActivated {
                            row: snapshot.row,
                            target: RowTarget::Body,
                        });
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let remove = egui::Button::new(
                            egui::RichText::new("✕").color(egui::Color32::from_rgb(0xdc, 0x26, 0x26)),
                        )
                        .frame(false);
                        if ui.add(remove).on_hover_text("Remove item").clicked() {
                            events.push(ListEvent::RowActivated {
                                row: snapshot.row,
                                target: RowTarget::RemoveControl,
                            });
                        }
                    });
                });
                ui.separator();
            }
        });
    }
}

impl eframe::App for ItemListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Shopping List");
            ui.add_space(8.0);

            self.show_form(ui, &mut events);
            ui.add_space(8.0);

            let controls_visible = self.controller.view().controls_visible();
            if controls_visible {
                self.show_filter(ui, &mut events);
                ui.add_space(8.0);
            }

            self.show_rows(ui, &mut events);

            if controls_visible {
                ui.add_space(8.0);
                if ui.button("Clear All").clicked() {
                    events.push(ListEvent::ClearAll);
                }
            }

            if let Some(status) = &self.status {
                ui.add_space(8.0);
                ui.colored_label(ui.visuals().error_fg_color, status);
            }
        });

        for event in events {
            self.dispatch(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_overrides_replace_settings() {
        let settings = Settings {
            storage_key: "items".into(),
            data_dir: PathBuf::from("/default"),
        };
        let startup = StartupConfig {
            data_dir: Some(PathBuf::from("/custom")),
            storage_key: Some("groceries".into()),
        };

        let applied = startup.apply(settings);
        assert_eq!(applied.data_dir, PathBuf::from("/custom"));
        assert_eq!(applied.storage_key, "groceries");
    }

    #[test]
    fn blank_storage_key_override_is_ignored() {
        let settings = Settings {
            storage_key: "items".into(),
            data_dir: PathBuf::from("/default"),
        };
        let startup = StartupConfig {
            data_dir: None,
            storage_key: Some("  ".into()),
        };

        let applied = startup.apply(settings);
        assert_eq!(applied.storage_key, "items");
        assert_eq!(applied.data_dir, PathBuf::from("/default"));
    }
}
