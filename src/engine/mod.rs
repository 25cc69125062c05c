pub mod apply_action;
pub mod engine;
pub mod new_game;
pub mod protocol;
pub mod session;
pub mod tick;
