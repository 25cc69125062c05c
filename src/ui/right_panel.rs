use eframe::egui;

use crate::ui::app::UiState;

pub fn draw_right_panel(ctx: &egui::Context, state: &UiState) {
    egui::SidePanel::right("hud")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Character");
            ui.separator();

            let Some(view) = &state.view else {
                ui.label("Waking up…");
                return;
            };
            let s = &view.state;

            egui::Grid::new("hud_grid").num_columns(2).show(ui, |ui| {
                row(ui, "Class", &view.class_name);
                row(ui, "HP", &format!("{}/{}", s.hp, s.max_hp));
                row(ui, "Stamina", &format!("{}/{}", s.stamina, s.max_stamina));
                row(ui, "Hunger", &s.hunger.to_string());
                row(ui, "Time", &s.time.to_string());
            });

            ui.add(egui::ProgressBar::new(fraction(s.hp, s.max_hp)).text("HP"));
            ui.add(egui::ProgressBar::new(fraction(s.stamina, s.max_stamina)).text("Stamina"));

            ui.separator();
            ui.label(egui::RichText::new("Inventory").strong());
            ui.add(egui::Label::new(&view.inventory_text).wrap());
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(label);
    ui.label(value);
    ui.end_row();
}

fn fraction(value: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (value.max(0) as f32 / max as f32).min(1.0)
}
