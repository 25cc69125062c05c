use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::tick::{tick, HUNGER_CEILING};
use crate::model::event_result::ActionOutcome;
use crate::model::game_state::{GameState, FALLEN_FLAG};
use crate::model::message::LogTag;
use crate::model::world::{Location, World};

/// Stamina spent walking through an exit.
pub const TRAVEL_COST: i32 = 2;
/// Lowest d20 roll that scouts safely.
pub const SCOUT_SAFE_ROLL: u32 = 12;

/// Something the player asked to do on this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Travel { exit: String },
    Search,
    Rest,
    Craft,
    CraftRecipe { recipe_id: String },
    Scout,
    Talk,
    CheckInventory,
    Other { id: String },
}

impl Action {
    /// Map an action id from the world table onto an action.
    pub fn from_location_action(id: &str) -> Self {
        match id {
            "search" => Action::Search,
            "rest" => Action::Rest,
            "craft" => Action::Craft,
            "scout" => Action::Scout,
            "talk" => Action::Talk,
            other => Action::Other { id: other.to_string() },
        }
    }

    pub fn short_name(&self) -> &str {
        match self {
            Action::Travel { .. } => "Travel",
            Action::Search => "Search",
            Action::Rest => "Rest",
            Action::Craft => "Craft",
            Action::CraftRecipe { .. } => "CraftRecipe",
            Action::Scout => "Scout",
            Action::Talk => "Talk",
            Action::CheckInventory => "CheckInventory",
            Action::Other { id } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeChoice {
    pub id: String,
    pub name: String,
    pub affordable: bool,
}

pub fn recipe_choices(state: &GameState, world: &World) -> Vec<RecipeChoice> {
    world
        .recipes
        .iter()
        .map(|r| RecipeChoice {
            id: r.id.clone(),
            name: r.name.clone(),
            affordable: state.has_items(&r.requires),
        })
        .collect()
}

fn check_available(loc: &Location, action: &Action) -> Result<(), String> {
    let required = match action {
        Action::Travel { exit } => {
            return match loc.exit(exit) {
                Some(_) => Ok(()),
                None => Err(format!("No exit '{}' from {}", exit, loc.id)),
            };
        }
        Action::CheckInventory => return Ok(()),
        Action::Search => "search",
        Action::Rest => "rest",
        Action::Craft | Action::CraftRecipe { .. } => "craft",
        Action::Scout => "scout",
        Action::Talk => "talk",
        Action::Other { id } => id.as_str(),
    };

    if loc.offers(required) {
        Ok(())
    } else {
        Err(format!("'{}' is not available at {}", required, loc.id))
    }
}

fn blocked(state: &mut GameState, reason: &str) -> ActionOutcome {
    state.push_log(reason, LogTag::Block);
    ActionOutcome::Blocked {
        reason: reason.to_string(),
    }
}

/// Resolve one action against the state, returning what happened.
pub fn apply_action<R: Rng>(
    state: &mut GameState,
    world: &World,
    action: &Action,
    rng: &mut R,
) -> ActionOutcome {
    let Some(loc) = world.location(&state.location_id) else {
        return ActionOutcome::Rejected {
            reason: format!("Unknown location '{}'", state.location_id),
        };
    };

    if let Err(reason) = check_available(loc, action) {
        return ActionOutcome::Rejected { reason };
    }

    if state.has_fallen() && *action != Action::CheckInventory {
        return blocked(state, "You cannot go on. Load a save or start a new game.");
    }

    let outcome = match action {
        Action::Travel { exit } => travel(state, loc, exit),
        Action::Search => search(state, world, loc, rng),
        Action::Rest => rest(state),
        Action::Craft => {
            state.push_log("You consider what you can make...", LogTag::Craft);
            tick(state);
            ActionOutcome::Applied
        }
        Action::CraftRecipe { recipe_id } => craft_recipe(state, world, recipe_id),
        Action::Scout => {
            if state.stamina <= 0 {
                return blocked(state, "Too tired to scout.");
            }
            state.stamina -= 1;
            resolve_scout(state, rng.gen_range(1..=20))
        }
        Action::Talk => {
            let line = loc
                .talk
                .as_deref()
                .unwrap_or("No one here seems willing to talk.");
            state.push_log(line, LogTag::Talk);
            tick(state);
            ActionOutcome::Applied
        }
        Action::CheckInventory => {
            let text = format!("Inventory: {}", state.describe_inventory(world));
            state.push_log(text, LogTag::Inventory);
            ActionOutcome::Applied
        }
        Action::Other { id } => {
            let reason = format!("That action ({}) is not implemented yet.", id);
            state.push_log(reason.clone(), LogTag::Debug);
            ActionOutcome::Deferred { reason }
        }
    };

    if state.hp <= 0 && !state.has_fallen() {
        state.set_flag(FALLEN_FLAG, true);
        state.push_log("You collapse. This run is over.", LogTag::Status);
    }

    outcome
}

fn travel(state: &mut GameState, loc: &Location, label: &str) -> ActionOutcome {
    let Some(exit) = loc.exit(label) else {
        return ActionOutcome::Rejected {
            reason: format!("No exit '{}'", label),
        };
    };

    if state.stamina <= 0 {
        return blocked(state, "You are too exhausted to move.");
    }

    state.stamina -= TRAVEL_COST;
    state.push_log(format!("You travel toward: {}.", label), LogTag::Move);
    state.location_id = exit.to.clone();
    tick(state);
    ActionOutcome::Applied
}

fn search<R: Rng>(state: &mut GameState, world: &World, loc: &Location, rng: &mut R) -> ActionOutcome {
    if loc.loot.is_empty() {
        state.push_log("You find nothing but dust and disappointment.", LogTag::Search);
        tick(state);
        return ActionOutcome::Applied;
    }

    if state.stamina <= 0 {
        return blocked(state, "Your hands feel heavy. You need rest.");
    }
    state.stamina -= 1;

    let found = &loc.loot[rng.gen_range(0..loc.loot.len())];
    state.add_item(found, 1);
    state.push_log(format!("You find: {}.", world.item_name(found)), LogTag::Search);
    tick(state);
    ActionOutcome::Applied
}

fn rest(state: &mut GameState) -> ActionOutcome {
    state.hp = (state.hp + 2).min(state.max_hp);
    state.stamina = (state.stamina + 3).min(state.max_stamina);
    state.hunger = (state.hunger + 1).min(HUNGER_CEILING);
    state.push_log("You rest. Your breath steadies.", LogTag::Rest);
    tick(state);
    ActionOutcome::Applied
}

fn craft_recipe(state: &mut GameState, world: &World, recipe_id: &str) -> ActionOutcome {
    let Some(recipe) = world.recipe(recipe_id) else {
        return ActionOutcome::Rejected {
            reason: format!("Unknown recipe '{}'", recipe_id),
        };
    };

    if !state.has_items(&recipe.requires) {
        state.push_log("You lack the materials.", LogTag::Craft);
        return ActionOutcome::Blocked {
            reason: "You lack the materials.".to_string(),
        };
    }

    state.spend_items(&recipe.requires);
    for (id, qty) in &recipe.gives {
        state.add_item(id, *qty);
    }
    let text = format!("You craft {}. {}", recipe.name, recipe.note);
    state.push_log(text.trim(), LogTag::Craft);
    tick(state);
    ActionOutcome::Applied
}

/// Settle a scouting roll (1..=20). Stamina has already been paid.
pub fn resolve_scout(state: &mut GameState, roll: u32) -> ActionOutcome {
    if roll >= SCOUT_SAFE_ROLL {
        state.push_log("You spot safer footing and avoid a nasty fall.", LogTag::Scout);
    } else {
        state.hp = (state.hp - 1).max(0);
        state.push_log("Loose gravel bites back. You lose 1 HP.", LogTag::Scout);
    }
    tick(state);
    ActionOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(location: &str) -> (World, GameState, StdRng) {
        let world = World::builtin();
        let mut state = GameState::new(&world);
        state.location_id = location.to_string();
        (world, state, StdRng::seed_from_u64(7))
    }

    #[test]
    fn travel_spends_stamina_then_ticks() {
        let (world, mut state, mut rng) = setup("camp");
        let outcome = apply_action(
            &mut state,
            &world,
            &Action::Travel { exit: "trail".into() },
            &mut rng,
        );

        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.location_id, "ridge");
        assert_eq!(state.stamina, 5);
        assert_eq!(state.time, 1);
        assert_eq!(state.log[0].text, "You travel toward: trail.");
    }

    #[test]
    fn travel_with_one_stamina_dips_then_recovers() {
        let (world, mut state, mut rng) = setup("camp");
        state.stamina = 1;
        apply_action(&mut state, &world, &Action::Travel { exit: "trail".into() }, &mut rng);
        assert_eq!(state.stamina, 0);
    }

    #[test]
    fn exhausted_travel_is_blocked_without_a_tick() {
        let (world, mut state, mut rng) = setup("camp");
        state.stamina = 0;
        let outcome = apply_action(
            &mut state,
            &world,
            &Action::Travel { exit: "trail".into() },
            &mut rng,
        );

        assert!(matches!(outcome, ActionOutcome::Blocked { .. }));
        assert_eq!(state.location_id, "camp");
        assert_eq!(state.time, 0);
        assert_eq!(state.log[0].tag, LogTag::Block);
    }

    #[test]
    fn unknown_exit_is_rejected_silently() {
        let (world, mut state, mut rng) = setup("camp");
        let outcome = apply_action(
            &mut state,
            &world,
            &Action::Travel { exit: "tunnel".into() },
            &mut rng,
        );

        assert!(matches!(outcome, ActionOutcome::Rejected { .. }));
        assert!(state.log.is_empty());
    }

    #[test]
    fn actions_not_listed_at_location_are_rejected() {
        let (world, mut state, mut rng) = setup("gate");
        let outcome = apply_action(&mut state, &world, &Action::Search, &mut rng);
        assert!(matches!(outcome, ActionOutcome::Rejected { .. }));
        assert_eq!(state.time, 0);
    }

    #[test]
    fn search_finds_local_loot() {
        let (world, mut state, mut rng) = setup("ridge");
        apply_action(&mut state, &world, &Action::Search, &mut rng);

        let found: Vec<_> = state.inventory.keys().cloned().collect();
        assert_eq!(found.len(), 1);
        assert!(["stone", "stick"].contains(&found[0].as_str()));
        assert_eq!(state.stamina, 6);
        assert_eq!(state.time, 1);
        assert!(state.log[0].text.starts_with("You find: "));
    }

    #[test]
    fn search_without_loot_still_takes_a_turn() {
        let (mut world, mut state, mut rng) = setup("ridge");
        world.locations[1].loot.clear();
        state.stamina = 0;

        let outcome = apply_action(&mut state, &world, &Action::Search, &mut rng);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.time, 1);
        assert_eq!(state.log[0].text, "You find nothing but dust and disappointment.");
    }

    #[test]
    fn tired_search_is_blocked() {
        let (world, mut state, mut rng) = setup("camp");
        state.stamina = 0;
        apply_action(&mut state, &world, &Action::Search, &mut rng);

        assert_eq!(state.log[0].text, "Your hands feel heavy. You need rest.");
        assert!(state.inventory.is_empty());
        assert_eq!(state.time, 0);
    }

    #[test]
    fn rest_restores_and_feeds_hunger() {
        let (world, mut state, mut rng) = setup("camp");
        state.hp = 5;
        state.stamina = 1;
        state.hunger = 2;
        apply_action(&mut state, &world, &Action::Rest, &mut rng);

        assert_eq!(state.hp, 7);
        assert_eq!(state.stamina, 5);
        assert_eq!(state.hunger, 4);
    }

    #[test]
    fn resting_while_starving_still_hurts() {
        let (world, mut state, mut rng) = setup("camp");
        state.hunger = 5;
        apply_action(&mut state, &world, &Action::Rest, &mut rng);

        assert_eq!(state.hp, 9);
        assert_eq!(state.hunger, 5);
        assert_eq!(state.log[0].text, "Hunger gnaws. You lose 1 HP.");
        assert_eq!(state.log[1].text, "You rest. Your breath steadies.");
    }

    #[test]
    fn crafting_rope_consumes_fiber() {
        let (world, mut state, mut rng) = setup("camp");
        state.add_item("fiber", 2);

        let menu = recipe_choices(&state, &world);
        assert_eq!(menu.len(), 1);
        assert!(menu[0].affordable);

        let outcome = apply_action(
            &mut state,
            &world,
            &Action::CraftRecipe { recipe_id: "rope".into() },
            &mut rng,
        );
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.inventory.get("rope"), Some(&1));
        assert!(!state.inventory.contains_key("fiber"));
        assert_eq!(state.log[0].text, "You craft Rope. Unlocks safer travel later.");
    }

    #[test]
    fn crafting_without_materials_does_not_tick() {
        let (world, mut state, mut rng) = setup("camp");
        state.add_item("fiber", 1);
        apply_action(
            &mut state,
            &world,
            &Action::CraftRecipe { recipe_id: "rope".into() },
            &mut rng,
        );

        assert_eq!(state.log[0].text, "You lack the materials.");
        assert_eq!(state.time, 0);
        assert_eq!(state.inventory.get("fiber"), Some(&1));
    }

    #[test]
    fn opening_the_craft_menu_takes_a_turn() {
        let (world, mut state, mut rng) = setup("camp");
        apply_action(&mut state, &world, &Action::Craft, &mut rng);
        assert_eq!(state.time, 1);
        assert_eq!(state.log[0].tag, LogTag::Craft);
    }

    #[test]
    fn scout_rolls() {
        let mut state = GameState::default();
        resolve_scout(&mut state, SCOUT_SAFE_ROLL);
        assert_eq!(state.hp, 10);

        resolve_scout(&mut state, SCOUT_SAFE_ROLL - 1);
        assert_eq!(state.hp, 9);
        assert_eq!(state.log[0].text, "Loose gravel bites back. You lose 1 HP.");
        assert_eq!(state.time, 2);
    }

    #[test]
    fn scouting_costs_stamina() {
        let (world, mut state, mut rng) = setup("ridge");
        apply_action(&mut state, &world, &Action::Scout, &mut rng);
        // -1 to scout, +1 from the tick
        assert_eq!(state.stamina, 6);
        assert_eq!(state.log.iter().filter(|e| e.tag == LogTag::Scout).count(), 1);
    }

    #[test]
    fn talk_uses_location_line() {
        let (world, mut state, mut rng) = setup("town");
        apply_action(&mut state, &world, &Action::Talk, &mut rng);
        assert_eq!(
            state.log[0].text,
            "A trader tells you: 'Nothing is free here. Not even silence.'"
        );
        assert_eq!(state.time, 1);
    }

    #[test]
    fn trade_is_deferred() {
        let (world, mut state, mut rng) = setup("town");
        let action = Action::from_location_action("trade");
        let outcome = apply_action(&mut state, &world, &action, &mut rng);

        assert!(matches!(outcome, ActionOutcome::Deferred { .. }));
        assert_eq!(state.log[0].text, "That action (trade) is not implemented yet.");
        assert_eq!(state.log[0].tag, LogTag::Debug);
        assert_eq!(state.time, 0);
    }

    #[test]
    fn move_button_is_a_placeholder() {
        let (world, mut state, mut rng) = setup("gate");
        let action = Action::from_location_action("move");
        let outcome = apply_action(&mut state, &world, &action, &mut rng);

        assert!(matches!(outcome, ActionOutcome::Deferred { .. }));
        assert_eq!(state.log[0].text, "That action (move) is not implemented yet.");
        assert_eq!((state.time, state.location_id.as_str()), (0, "gate"));
    }

    #[test]
    fn checking_inventory_is_free() {
        let (world, mut state, mut rng) = setup("gate");
        state.add_item("stick", 1);
        apply_action(&mut state, &world, &Action::CheckInventory, &mut rng);

        assert_eq!(state.log[0].text, "Inventory: Stick x1");
        assert_eq!(state.time, 0);
    }

    #[test]
    fn collapse_blocks_further_actions() {
        let (world, mut state, mut rng) = setup("camp");
        state.hp = 1;
        state.hunger = 5;
        apply_action(&mut state, &world, &Action::Craft, &mut rng);

        assert_eq!(state.hp, 0);
        assert!(state.has_fallen());
        assert_eq!(state.log[0].text, "You collapse. This run is over.");

        let outcome = apply_action(&mut state, &world, &Action::Rest, &mut rng);
        assert!(matches!(outcome, ActionOutcome::Blocked { .. }));
        assert_eq!(state.hp, 0);

        let outcome = apply_action(&mut state, &world, &Action::CheckInventory, &mut rng);
        assert_eq!(outcome, ActionOutcome::Applied);
    }
}
