use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/* =========================
   World Definition
   ========================= */

/// Item id to quantity, kept in the order items were first added.
pub type ItemCounts = IndexMap<String, u32>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exit {
    pub label: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub title: String,
    pub desc: String,
    #[serde(default)]
    pub exits: Vec<Exit>,
    #[serde(default)]
    pub loot: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    /// Line spoken by whoever answers the `talk` action here.
    #[serde(default)]
    pub talk: Option<String>,
}

impl Location {
    pub fn exit(&self, label: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.label == label)
    }

    pub fn offers(&self, action_id: &str) -> bool {
        self.actions.iter().any(|a| a == action_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub requires: ItemCounts,
    pub gives: ItemCounts,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub start_location_id: String,
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("invalid world JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("start location '{0}' does not exist")]
    MissingStart(String),

    #[error("location '{0}' is defined more than once")]
    DuplicateLocation(String),

    #[error("exit '{label}' in '{from}' leads to unknown location '{to}'")]
    DanglingExit {
        from: String,
        label: String,
        to: String,
    },

    #[error("'{owner}' refers to unknown item '{item}'")]
    UnknownItem { owner: String, item: String },
}

impl World {
    pub fn from_json_str(text: &str) -> Result<Self, WorldError> {
        let world: World = serde_json::from_str(text)?;
        world.validate()?;
        Ok(world)
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        let mut ids = HashSet::new();
        for loc in &self.locations {
            if !ids.insert(loc.id.as_str()) {
                return Err(WorldError::DuplicateLocation(loc.id.clone()));
            }
        }

        if !ids.contains(self.start_location_id.as_str()) {
            return Err(WorldError::MissingStart(self.start_location_id.clone()));
        }

        let known_item = |owner: &str, item: &str| {
            if self.item(item).is_some() {
                Ok(())
            } else {
                Err(WorldError::UnknownItem {
                    owner: owner.to_string(),
                    item: item.to_string(),
                })
            }
        };

        for loc in &self.locations {
            for exit in &loc.exits {
                if !ids.contains(exit.to.as_str()) {
                    return Err(WorldError::DanglingExit {
                        from: loc.id.clone(),
                        label: exit.label.clone(),
                        to: exit.to.clone(),
                    });
                }
            }
            for item in &loc.loot {
                known_item(loc.id.as_str(), item.as_str())?;
            }
        }

        for recipe in &self.recipes {
            for item in recipe.requires.keys().chain(recipe.gives.keys()) {
                known_item(recipe.id.as_str(), item.as_str())?;
            }
        }

        Ok(())
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Display name of an item, or the raw id for anything unknown.
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id).map(|i| i.name.as_str()).unwrap_or(id)
    }

    pub fn format_items_inline(&self, items: &ItemCounts) -> String {
        if items.is_empty() {
            return "Nothing".to_string();
        }
        items
            .iter()
            .map(|(id, qty)| format!("{} x{}", self.item_name(id), qty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn action_label(id: &str) -> &str {
    match id {
        "search" => "Search the area",
        "rest" => "Rest",
        "craft" => "Craft",
        "scout" => "Scout ahead",
        "talk" => "Talk",
        other => other,
    }
}

/* =========================
   Built-in world
   ========================= */

fn location(
    id: &str,
    title: &str,
    desc: &str,
    exits: &[(&str, &str)],
    loot: &[&str],
    actions: &[&str],
) -> Location {
    Location {
        id: id.into(),
        title: title.into(),
        desc: desc.into(),
        exits: exits
            .iter()
            .map(|(label, to)| Exit {
                label: (*label).into(),
                to: (*to).into(),
            })
            .collect(),
        loot: loot.iter().map(|s| (*s).into()).collect(),
        actions: actions.iter().map(|s| (*s).into()).collect(),
        talk: None,
    }
}

fn item(id: &str, name: &str, desc: &str) -> Item {
    Item {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
    }
}

impl World {
    pub fn builtin() -> Self {
        let mut town = location(
            "town",
            "Bridgetown Outpost",
            "Lantern light. Muted voices. Traders watch you like you are a weather event.",
            &[("out", "gate")],
            &[],
            &["talk", "trade", "rest"],
        );
        town.talk = Some("A trader tells you: 'Nothing is free here. Not even silence.'".into());

        Self {
            start_location_id: "camp".into(),
            locations: vec![
                location(
                    "camp",
                    "Wrecked Camp",
                    "A cold firepit. Torn canvas. Footprints lead toward scrub and stone.",
                    &[("trail", "ridge")],
                    &["fiber", "stick", "scrap"],
                    &["search", "rest", "craft"],
                ),
                location(
                    "ridge",
                    "Wind-Raked Ridge",
                    "The ground drops away into fog. Something down there is breathing slowly.",
                    &[("back", "camp"), ("path", "gully")],
                    &["stone", "stick"],
                    &["search", "scout", "move"],
                ),
                location(
                    "gully",
                    "Dry Gully",
                    "A slit of land littered with bones and rust. A narrow climb leads up a sheer lip.",
                    &[("up", "ridge"), ("east", "gate")],
                    &["scrap", "fiber"],
                    &["search", "move"],
                ),
                location(
                    "gate",
                    "Broken Gate",
                    "A fallen archway of old brick. Beyond it, the outline of a small settlement.",
                    &[("west", "gully"), ("in", "town")],
                    &[],
                    &["move"],
                ),
                town,
            ],
            items: vec![
                item("stick", "Stick", "Light wood. Useful for tools."),
                item("stone", "Stone", "Sharp enough if you insist."),
                item("fiber", "Fiber", "Twist it, braid it, bind it."),
                item("scrap", "Scrap", "Bent metal. Potential."),
                item("rope", "Rope", "A promise you can climb."),
            ],
            recipes: vec![Recipe {
                id: "rope".into(),
                name: "Rope".into(),
                requires: ItemCounts::from([("fiber".to_string(), 2)]),
                gives: ItemCounts::from([("rope".to_string(), 1)]),
                note: "Unlocks safer travel later.".into(),
            }],
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::builtin()
    }
}
