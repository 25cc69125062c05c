use std::sync::mpsc;

use eframe::egui;
use tracing::warn;

use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::session::{GameView, Session};
use crate::model::game_save::SaveSummary;
use crate::model::message::LogTag;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::class_picker::draw_class_picker;
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::save_settings;

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub(crate) struct UiState {
    /// Latest picture from the engine; `None` until the first one arrives.
    pub view: Option<GameView>,
    pub save_name: String,

    pub show_class_picker: bool,
    pub show_settings: bool,
    pub pending_delete: Option<SaveSummary>,
}

/* =========================
   App
   ========================= */

pub struct TextRpgApp {
    ui: UiState,
    settings: UiSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl TextRpgApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session, settings: UiSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let repaint = cc.egui_ctx.clone();

        let spawned = std::thread::Builder::new()
            .name("engine".into())
            .spawn(move || {
                let mut engine =
                    Engine::new(cmd_rx, resp_tx, session).with_notify(move || repaint.request_repaint());
                engine.run();
            });
        if let Err(err) = spawned {
            warn!(error = %err, "engine_thread_spawn_failed");
        }

        Self {
            ui: UiState::default(),
            settings,
            cmd_tx,
            resp_rx,
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for TextRpgApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.clamped_scale());

        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::View(view) => self.ui.view = Some(*view),
            }
        }

        /* TOP BAR */
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("New Game").clicked() {
                    self.ui.show_class_picker = true;
                }
                if ui.button("Settings").clicked() {
                    self.ui.show_settings = !self.ui.show_settings;
                }
            });
        });

        draw_left_panel(ctx, &mut self.ui, &self.cmd_tx);
        draw_right_panel(ctx, &self.ui);
        draw_center_panel(ctx, &self.ui, &self.settings, &self.cmd_tx);

        draw_class_picker(ctx, &mut self.ui, &self.cmd_tx);
        draw_delete_confirm(ctx, &mut self.ui, &self.cmd_tx);
        draw_settings_window(ctx, &mut self.ui, &mut self.settings);
    }
}

fn draw_delete_confirm(
    ctx: &egui::Context,
    state: &mut UiState,
    cmd_tx: &mpsc::Sender<EngineCommand>,
) {
    let Some(target) = state.pending_delete.clone() else {
        return;
    };

    let mut decided = false;
    egui::Window::new("Delete save")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{}\"? This cannot be undone.", target.label));
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    let _ = cmd_tx.send(EngineCommand::DeleteSave {
                        id: Some(target.id.clone()),
                    });
                    decided = true;
                }
                if ui.button("Cancel").clicked() {
                    decided = true;
                }
            });
        });

    if decided {
        state.pending_delete = None;
    }
}

fn draw_settings_window(ctx: &egui::Context, state: &mut UiState, settings: &mut UiSettings) {
    if !state.show_settings {
        return;
    }

    let mut open = true;
    let mut changed = false;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("UI Scale");
            changed |= ui
                .add(egui::Slider::new(&mut settings.ui_scale, 0.75..=2.0))
                .changed();

            ui.separator();
            ui.label("Log colors");
            egui::Grid::new("tag_colors").num_columns(2).show(ui, |ui| {
                for tag in LogTag::ALL {
                    let mut color = settings.color(tag);
                    ui.label(tag.as_str());
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        settings.set_color(tag, color);
                        changed = true;
                    }
                    ui.end_row();
                }
            });

            ui.separator();
            if ui.button("Reset to defaults").clicked() {
                *settings = UiSettings::default();
                changed = true;
            }
        });

    if changed {
        save_settings(settings);
    }
    state.show_settings = open;
}
