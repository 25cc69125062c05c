use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::model::game_save::{format_save_option, selection_hint};
use crate::ui::app::UiState;

/* =========================
   Save slots
   ========================= */

pub fn draw_left_panel(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::SidePanel::left("saves")
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Saves");

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.save_name)
                        .hint_text("Name this run")
                        .desired_width(160.0),
                );
                if ui.button("Save New").clicked() {
                    let _ = cmd_tx.send(EngineCommand::SaveNew {
                        label: state.save_name.trim().to_string(),
                    });
                    state.save_name.clear();
                }
            });

            ui.separator();

            let (saves, selected_id) = match &state.view {
                Some(view) => (view.saves.clone(), view.selected_save.clone()),
                None => (Vec::new(), None),
            };

            if saves.is_empty() {
                ui.label("No saves yet");
                ui.small("Tip: Type a name then tap “Save New”.");
                return;
            }

            let selected = selected_id
                .as_ref()
                .and_then(|id| saves.iter().find(|s| &s.id == id));

            let mut picked = selected_id.clone();
            egui::ComboBox::from_id_salt("save_select")
                .width(240.0)
                .selected_text(selected.map(|s| s.label.clone()).unwrap_or_default())
                .show_ui(ui, |ui| {
                    for s in &saves {
                        ui.selectable_value(&mut picked, Some(s.id.clone()), format_save_option(s));
                    }
                });
            if picked != selected_id {
                let _ = cmd_tx.send(EngineCommand::SelectSave { id: picked });
            }

            if let Some(s) = selected {
                ui.add(egui::Label::new(egui::RichText::new(selection_hint(s)).small()).wrap());
            }

            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                if ui.button("Quick Save").clicked() {
                    let _ = cmd_tx.send(EngineCommand::QuickSave {
                        id: selected_id.clone(),
                    });
                }
                if ui.button("Load").clicked() {
                    let _ = cmd_tx.send(EngineCommand::LoadSave {
                        id: selected_id.clone(),
                    });
                }
                if ui.button("Delete").clicked() {
                    state.pending_delete = selected.cloned();
                }
            });
        });
}
