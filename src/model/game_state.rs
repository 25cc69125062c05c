use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::model::message::{LogEntry, LogTag};
use crate::model::world::{ItemCounts, World};

/// Most recent log lines kept in the state (and therefore in saves).
pub const LOG_CAPACITY: usize = 80;

/// Flag set once HP has run out.
pub const FALLEN_FLAG: &str = "fallen";

/// The whole run. This is exactly what gets written into a save slot.
///
/// Fields missing from an older save fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub time: u64,
    pub location_id: String,
    pub player_class_id: Option<String>,
    pub max_hp: i32,
    pub max_stamina: i32,
    pub hp: i32,
    pub stamina: i32,
    pub hunger: i32,
    /// First-acquired first.
    pub inventory: ItemCounts,
    pub flags: BTreeMap<String, bool>,
    /// Newest first.
    pub log: VecDeque<LogEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            time: 0,
            location_id: "camp".to_string(),
            player_class_id: None,
            max_hp: 10,
            max_stamina: 6,
            hp: 10,
            stamina: 6,
            hunger: 0,
            inventory: ItemCounts::new(),
            flags: BTreeMap::new(),
            log: VecDeque::new(),
        }
    }
}

impl GameState {
    pub fn new(world: &World) -> Self {
        Self {
            location_id: world.start_location_id.clone(),
            ..Self::default()
        }
    }

    pub fn push_log(&mut self, text: impl Into<String>, tag: LogTag) {
        self.log.push_front(LogEntry::now(text, tag));
        self.log.truncate(LOG_CAPACITY);
    }

    pub fn add_item(&mut self, id: &str, qty: u32) {
        let entry = self.inventory.entry(id.to_string()).or_insert(0);
        *entry = entry.saturating_add(qty);
    }

    pub fn has_items(&self, req: &ItemCounts) -> bool {
        req.iter()
            .all(|(id, qty)| self.inventory.get(id).copied().unwrap_or(0) >= *qty)
    }

    /// Callers check `has_items` first; short stacks are simply emptied.
    pub fn spend_items(&mut self, req: &ItemCounts) {
        for (id, qty) in req {
            if let Some(have) = self.inventory.get_mut(id) {
                *have = have.saturating_sub(*qty);
                if *have == 0 {
                    self.inventory.shift_remove(id);
                }
            }
        }
    }

    pub fn describe_inventory(&self, world: &World) -> String {
        if self.inventory.is_empty() {
            return "Empty pockets.".to_string();
        }
        world.format_items_inline(&self.inventory)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_string(), value);
    }

    pub fn has_fallen(&self) -> bool {
        self.flag(FALLEN_FLAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_removes_empty_stacks() {
        let mut state = GameState::default();
        state.add_item("fiber", 3);
        state.add_item("stick", 1);

        let req = ItemCounts::from([("fiber".to_string(), 2), ("stick".to_string(), 1)]);
        assert!(state.has_items(&req));
        state.spend_items(&req);

        assert_eq!(state.inventory.get("fiber"), Some(&1));
        assert!(!state.inventory.contains_key("stick"));
        assert!(!state.has_items(&req));
    }

    #[test]
    fn log_is_newest_first_and_capped() {
        let mut state = GameState::default();
        for i in 0..(LOG_CAPACITY + 5) {
            state.push_log(format!("line {i}"), LogTag::System);
        }

        assert_eq!(state.log.len(), LOG_CAPACITY);
        assert_eq!(state.log[0].text, format!("line {}", LOG_CAPACITY + 4));
        assert_eq!(state.log[LOG_CAPACITY - 1].text, "line 5");
    }

    #[test]
    fn inventory_description() {
        let world = World::builtin();
        let mut state = GameState::new(&world);
        assert_eq!(state.describe_inventory(&world), "Empty pockets.");

        state.add_item("scrap", 2);
        assert_eq!(state.describe_inventory(&world), "Scrap x2");
    }

    #[test]
    fn inventory_keeps_pickup_order() {
        let world = World::builtin();
        let mut state = GameState::new(&world);
        state.add_item("stone", 1);
        state.add_item("fiber", 1);
        state.add_item("rope", 1);
        state.add_item("stone", 1);
        assert_eq!(state.describe_inventory(&world), "Stone x2, Fiber x1, Rope x1");

        state.spend_items(&ItemCounts::from([("fiber".to_string(), 1)]));
        assert_eq!(state.describe_inventory(&world), "Stone x2, Rope x1");
    }

    #[test]
    fn inventory_order_survives_a_save_round_trip() {
        let world = World::builtin();
        let mut state = GameState::new(&world);
        state.add_item("stick", 1);
        state.add_item("fiber", 1);

        let json = serde_json::to_string(&state).expect("serializes");
        let back: GameState = serde_json::from_str(&json).expect("parses");
        assert_eq!(back.describe_inventory(&world), "Stick x1, Fiber x1");
    }

    #[test]
    fn partial_save_fills_defaults() {
        let json = r#"{ "time": 7, "locationId": "ridge", "hp": 3 }"#;
        let state: GameState = serde_json::from_str(json).expect("parses");

        assert_eq!(state.time, 7);
        assert_eq!(state.location_id, "ridge");
        assert_eq!(state.hp, 3);
        assert_eq!(state.max_stamina, 6);
        assert!(state.log.is_empty());
    }

    #[test]
    fn state_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(GameState::default()).expect("serializes");
        assert!(value.get("maxHp").is_some());
        assert!(value.get("playerClassId").is_some());
    }
}
