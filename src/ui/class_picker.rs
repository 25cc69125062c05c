use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::ui::app::UiState;

/// Overlay shown by "New Game": one button per starter class.
pub fn draw_class_picker(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    if !state.show_class_picker {
        return;
    }
    let Some(view) = &state.view else {
        return;
    };

    let mut close = false;
    egui::Window::new("Choose your class")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Pick a class to begin.");
            ui.separator();

            for class in &view.classes {
                let text = format!(
                    "{}\n{}\nHP {} | Stamina {}\nStart: {}",
                    class.name, class.blurb, class.max_hp, class.max_stamina, class.start_gear
                );
                if ui
                    .add(egui::Button::new(text).min_size(egui::vec2(320.0, 0.0)))
                    .clicked()
                {
                    let _ = cmd_tx.send(EngineCommand::NewGame {
                        class_id: class.id.clone(),
                    });
                    close = true;
                }
                ui.add_space(4.0);
            }

            ui.small("Tip: You can save multiple runs later.");
            if ui.button("Cancel").clicked() {
                close = true;
            }
        });

    if close {
        state.show_class_picker = false;
    }
}
