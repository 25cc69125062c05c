use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::model::game_state::GameState;
use crate::model::player_class;
use crate::model::world::World;

pub const DEFAULT_SAVE_LABEL: &str = "Unnamed run";

/// One row of the save index, enough to pick a slot without loading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSummary {
    pub id: String,
    pub label: String,
    /// RFC 3339, UTC.
    pub created_at: String,
    pub updated_at: String,
    pub location_id: String,
    pub location_title: String,
    #[serde(default)]
    pub class_name: String,
    pub hp: i32,
    pub stamina: i32,
    pub hunger: i32,
    pub time: u64,
}

impl SaveSummary {
    pub fn describe(
        state: &GameState,
        world: &World,
        id: &str,
        label: &str,
        created_at: &str,
        updated_at: &str,
    ) -> Self {
        let label = label.trim();
        let location_title = world
            .location(&state.location_id)
            .map(|l| l.title.clone())
            .unwrap_or_else(|| state.location_id.clone());

        Self {
            id: id.to_string(),
            label: if label.is_empty() {
                DEFAULT_SAVE_LABEL.to_string()
            } else {
                label.to_string()
            },
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
            location_id: state.location_id.clone(),
            location_title,
            class_name: player_class::display_name(state.player_class_id.as_deref()),
            hp: state.hp,
            stamina: state.stamina,
            hunger: state.hunger,
            time: state.time,
        }
    }
}

fn local_time(stamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(stamp)
        .ok()
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
}

/// One-line description used by the slot picker.
pub fn format_save_option(s: &SaveSummary) -> String {
    let when = local_time(&s.updated_at).unwrap_or_else(|| "unknown date".to_string());
    let class = if s.class_name.is_empty() {
        String::new()
    } else {
        format!(" | {}", s.class_name)
    };
    format!(
        "{}{} | {} | {} | t:{} HP:{}",
        s.label, class, when, s.location_title, s.time, s.hp
    )
}

pub fn selection_hint(s: &SaveSummary) -> String {
    let created = local_time(&s.created_at).unwrap_or_else(|| "unknown".to_string());
    let class = if s.class_name.is_empty() {
        "None"
    } else {
        s.class_name.as_str()
    };
    format!("Selected: \"{}\" ({}) (created {}).", s.label, class, created)
}
