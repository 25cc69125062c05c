use std::collections::HashMap;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::model::message::LogTag;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Log tag → chip color
    pub tag_colors: HashMap<String, [u8; 4]>,
}

fn default_tag_color(tag: LogTag) -> [u8; 4] {
    match tag {
        LogTag::Status | LogTag::Block => [130, 50, 50, 255],
        LogTag::Move | LogTag::Scout => [40, 70, 120, 255],
        LogTag::Search | LogTag::Craft | LogTag::Inventory => [40, 90, 60, 255],
        LogTag::Rest | LogTag::Talk => [90, 60, 120, 255],
        LogTag::Intro | LogTag::Class => [120, 80, 40, 255],
        LogTag::System | LogTag::Debug => [80, 80, 80, 255],
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        let tag_colors = LogTag::ALL
            .iter()
            .map(|tag| (tag.as_str().to_string(), default_tag_color(*tag)))
            .collect();

        Self {
            ui_scale: 1.0,
            tag_colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, tag: LogTag) -> Color32 {
        let c = self
            .tag_colors
            .get(tag.as_str())
            .copied()
            .unwrap_or_else(|| default_tag_color(tag));
        Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
    }

    pub fn set_color(&mut self, tag: LogTag, color: Color32) {
        self.tag_colors.insert(
            tag.as_str().to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }

    /// Keeps a hand-edited settings file from shrinking the UI to nothing.
    pub fn clamped_scale(&self) -> f32 {
        if self.ui_scale.is_finite() {
            self.ui_scale.clamp(0.75, 2.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_a_default_color() {
        let settings = UiSettings::default();
        assert_eq!(settings.tag_colors.len(), LogTag::ALL.len());
    }

    #[test]
    fn colors_round_trip_and_fall_back() {
        let mut settings = UiSettings::default();
        settings.set_color(LogTag::Block, Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.color(LogTag::Block), Color32::from_rgb(1, 2, 3));

        settings.tag_colors.clear();
        assert_eq!(
            settings.color(LogTag::System),
            Color32::from_rgba_unmultiplied(80, 80, 80, 255)
        );
    }

    #[test]
    fn scale_is_clamped() {
        let settings = UiSettings {
            ui_scale: 9.0,
            ..UiSettings::default()
        };
        assert_eq!(settings.clamped_scale(), 2.0);
    }
}
