use std::sync::mpsc::Sender;

use eframe::egui;

use crate::engine::apply_action::Action;
use crate::engine::protocol::EngineCommand;
use crate::model::message::LogEntry;
use crate::ui::app::UiState;
use crate::ui::settings::UiSettings;

pub fn draw_center_panel(
    ctx: &egui::Context,
    state: &UiState,
    settings: &UiSettings,
    cmd_tx: &Sender<EngineCommand>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(view) = &state.view else {
            ui.label("Loading…");
            return;
        };

        // ---------- Location ----------
        match &view.location {
            Some(loc) => {
                ui.heading(&loc.title);
                ui.add(egui::Label::new(&loc.desc).wrap());
            }
            None => {
                ui.heading(&view.state.location_id);
            }
        }

        ui.add_space(8.0);

        // ---------- Choices ----------
        ui.horizontal_wrapped(|ui| {
            for choice in &view.choices {
                if ui.button(&choice.label).clicked() {
                    let _ = cmd_tx.send(EngineCommand::Perform(choice.action.clone()));
                }
            }
        });

        if let Some(menu) = &view.craft_menu {
            ui.horizontal_wrapped(|ui| {
                for recipe in menu {
                    let text = if recipe.affordable {
                        egui::RichText::new(format!("Craft: {}", recipe.name))
                    } else {
                        egui::RichText::new(format!("Craft: {} (missing items)", recipe.name)).weak()
                    };
                    if ui.button(text).clicked() {
                        let _ = cmd_tx.send(EngineCommand::Perform(Action::CraftRecipe {
                            recipe_id: recipe.id.clone(),
                        }));
                    }
                }
            });
        }

        ui.separator();

        // ---------- Log ----------
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in &view.state.log {
                    draw_log_line(ui, settings, entry);
                }
            });
    });
}

fn draw_log_line(ui: &mut egui::Ui, settings: &UiSettings, entry: &LogEntry) {
    ui.horizontal_wrapped(|ui| {
        tag_chip(ui, settings.color(entry.tag), entry.tag.as_str());
        ui.label(&entry.text);
    });
    ui.add_space(2.0);
}

fn tag_chip(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(4)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(egui::Color32::WHITE));
        });
}
