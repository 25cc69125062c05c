use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::apply_action::{apply_action, recipe_choices, Action, RecipeChoice};
use crate::engine::new_game::start_new_game;
use crate::model::event_result::ActionOutcome;
use crate::model::game_save::SaveSummary;
use crate::model::game_state::GameState;
use crate::model::message::LogTag;
use crate::model::player_class;
use crate::model::world::{action_label, Location, World};
use crate::storage::{SaveError, SaveManager};

/// A button the front end can offer for the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOption {
    pub id: String,
    pub name: String,
    pub blurb: String,
    pub max_hp: i32,
    pub max_stamina: i32,
    pub start_gear: String,
}

/// Read-only picture of the session handed to the render layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub state: GameState,
    pub class_name: String,
    pub inventory_text: String,
    pub location: Option<Location>,
    pub choices: Vec<Choice>,
    pub craft_menu: Option<Vec<RecipeChoice>>,
    pub saves: Vec<SaveSummary>,
    pub selected_save: Option<String>,
    pub classes: Vec<ClassOption>,
}

pub struct Session {
    world: World,
    state: GameState,
    saves: SaveManager,
    rng: StdRng,
    craft_menu: Option<Vec<RecipeChoice>>,
    selected_save: Option<String>,
}

impl Session {
    pub fn new(world: World, saves: SaveManager, rng: StdRng) -> Self {
        let mut state = GameState::new(&world);
        state.push_log("Press New Game to begin.", LogTag::System);
        let selected_save = saves.list().first().map(|s| s.id.clone());

        Self {
            world,
            state,
            saves,
            rng,
            craft_menu: None,
            selected_save,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn selected_save(&self) -> Option<&str> {
        self.selected_save.as_deref()
    }

    pub fn new_game(&mut self, class_id: &str) {
        match start_new_game(&mut self.state, &self.world, class_id) {
            Ok(()) => {
                self.craft_menu = None;
                info!(class = class_id, "new_game_started");
            }
            Err(err) => warn!(error = %err, "new_game_rejected"),
        }
    }

    pub fn perform(&mut self, action: &Action) -> ActionOutcome {
        let outcome = apply_action(&mut self.state, &self.world, action, &mut self.rng);

        match &outcome {
            ActionOutcome::Rejected { reason } => {
                warn!(action = action.short_name(), %reason, "action_rejected");
                return outcome;
            }
            other => debug!(action = action.short_name(), outcome = ?other, "action_resolved"),
        }

        match action {
            Action::Craft => self.craft_menu = Some(recipe_choices(&self.state, &self.world)),
            Action::CraftRecipe { .. } => {
                if self.craft_menu.is_some() {
                    self.craft_menu = Some(recipe_choices(&self.state, &self.world));
                }
            }
            _ => self.craft_menu = None,
        }

        outcome
    }

    fn system(&mut self, text: impl Into<String>) {
        self.state.push_log(text, LogTag::System);
    }

    /// Keep the current pick while it still exists, otherwise fall back to the newest slot.
    fn reselect(&mut self, preferred: Option<String>) {
        let index = self.saves.list();
        let wanted = preferred.or_else(|| self.selected_save.clone());
        self.selected_save = match wanted {
            Some(id) if index.iter().any(|s| s.id == id) => Some(id),
            _ => index.first().map(|s| s.id.clone()),
        };
    }

    pub fn select_save(&mut self, id: Option<String>) {
        self.reselect(id);
    }

    pub fn save_new(&mut self, label: &str) {
        match self.saves.save_new(&self.state, &self.world, label) {
            Ok(summary) => {
                self.system(format!("Saved new run: \"{}\".", summary.label));
                self.reselect(Some(summary.id));
            }
            Err(err) => {
                warn!(error = %err, "save_new_failed");
                self.system(format!("Could not write save: {err}"));
            }
        }
    }

    pub fn quick_save(&mut self, id: Option<&str>) {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.system("No save selected to overwrite.");
            return;
        };

        match self.saves.overwrite(id, &self.state, &self.world, None) {
            Ok(summary) => {
                self.system(format!("Quick saved: \"{}\".", summary.label));
                self.reselect(Some(summary.id));
            }
            Err(SaveError::NotFound(_)) => self.system("Selected save not found."),
            Err(err) => {
                warn!(error = %err, "quick_save_failed");
                self.system(format!("Could not write save: {err}"));
            }
        }
    }

    pub fn load(&mut self, id: Option<&str>) {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.system("No save selected to load.");
            return;
        };

        match self.saves.load(id) {
            Ok(state) => {
                self.state = state;
                self.craft_menu = None;
                self.system("Loaded save.");
                self.reselect(Some(id.to_string()));
                info!(id, "save_loaded");
            }
            Err(SaveError::Missing(_)) => self.system("That save file is missing."),
            Err(SaveError::Corrupted { source, .. }) => {
                warn!(id, error = %source, "save_corrupted");
                self.system("Save data was corrupted.");
            }
            Err(err) => {
                warn!(id, error = %err, "save_load_failed");
                self.system(format!("Could not read save: {err}"));
            }
        }
    }

    pub fn delete(&mut self, id: Option<&str>) {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            self.system("No save selected to delete.");
            return;
        };

        match self.saves.delete(id) {
            Ok(remaining) => {
                self.system("Deleted save.");
                self.selected_save = remaining.first().map(|s| s.id.clone());
            }
            Err(err) => {
                warn!(id, error = %err, "save_delete_failed");
                self.system(format!("Could not write save: {err}"));
            }
        }
    }

    fn choices(&self, location: Option<&Location>) -> Vec<Choice> {
        let mut choices = Vec::new();

        if let Some(loc) = location {
            for exit in &loc.exits {
                choices.push(Choice {
                    label: format!("Go: {}", exit.label),
                    action: Action::Travel {
                        exit: exit.label.clone(),
                    },
                });
            }
            for id in &loc.actions {
                choices.push(Choice {
                    label: action_label(id).to_string(),
                    action: Action::from_location_action(id),
                });
            }
        }

        choices.push(Choice {
            label: "Check inventory".to_string(),
            action: Action::CheckInventory,
        });
        choices
    }

    pub fn view(&self) -> GameView {
        let location = self.world.location(&self.state.location_id).cloned();
        let classes = player_class::all()
            .iter()
            .map(|c| ClassOption {
                id: c.id.to_string(),
                name: c.name.to_string(),
                blurb: c.blurb.to_string(),
                max_hp: c.max_hp,
                max_stamina: c.max_stamina,
                start_gear: self.world.format_items_inline(&c.starting_items()),
            })
            .collect();

        GameView {
            state: self.state.clone(),
            class_name: player_class::display_name(self.state.player_class_id.as_deref()),
            inventory_text: self.state.describe_inventory(&self.world),
            choices: self.choices(location.as_ref()),
            location,
            craft_menu: self.craft_menu.clone(),
            saves: self.saves.list(),
            selected_save: self.selected_save.clone(),
            classes,
        }
    }
}
