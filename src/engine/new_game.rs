use thiserror::Error;

use crate::model::game_state::GameState;
use crate::model::message::LogTag;
use crate::model::player_class;
use crate::model::world::{ItemCounts, World};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewGameError {
    #[error("unknown class '{0}'")]
    UnknownClass(String),
}

/// Wipe the run and start over as `class_id`.
pub fn start_new_game(
    state: &mut GameState,
    world: &World,
    class_id: &str,
) -> Result<(), NewGameError> {
    let class = player_class::find(class_id)
        .ok_or_else(|| NewGameError::UnknownClass(class_id.to_string()))?;

    state.time = 0;
    state.location_id = world.start_location_id.clone();
    state.hunger = 0;
    state.inventory = ItemCounts::new();
    state.flags.clear();
    state.log.clear();

    state.player_class_id = Some(class.id.to_string());
    state.max_hp = class.max_hp;
    state.max_stamina = class.max_stamina;
    state.hp = class.max_hp;
    state.stamina = class.max_stamina;
    for (id, qty) in class.starting_items {
        state.add_item(id, *qty);
    }

    let gear = world.format_items_inline(&class.starting_items());
    state.push_log("A cold wind worries the edges of your thoughts.", LogTag::Intro);
    state.push_log("Somewhere behind you, a past you refuse to carry.", LogTag::Intro);
    state.push_log(format!("You are a {}.", class.name), LogTag::Class);
    state.push_log(format!("Start gear: {}.", gear), LogTag::Class);
    state.push_log("The road waits. It does not blink.", LogTag::Intro);

    Ok(())
}
