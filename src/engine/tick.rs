use crate::model::game_state::GameState;
use crate::model::message::LogTag;

/// Hunger at which the body starts paying in HP.
pub const STARVING_AT: i32 = 6;
/// Where hunger settles after a starvation hit.
pub const HUNGER_CEILING: i32 = 5;

/// Advance the clock by one turn.
pub fn tick(state: &mut GameState) {
    state.time += 1;
    state.hunger += 1;

    if state.hunger >= STARVING_AT {
        state.hp = (state.hp - 1).max(0);
        state.push_log("Hunger gnaws. You lose 1 HP.", LogTag::Status);
        state.hunger = HUNGER_CEILING;
    }

    state.stamina = (state.stamina + 1).min(state.max_stamina);
}
