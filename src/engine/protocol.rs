use crate::engine::apply_action::Action;
use crate::engine::session::GameView;

/// UI events sent to the engine thread.
pub enum EngineCommand {
    NewGame { class_id: String },
    Perform(Action),
    SaveNew { label: String },
    QuickSave { id: Option<String> },
    LoadSave { id: Option<String> },
    DeleteSave { id: Option<String> },
    SelectSave { id: Option<String> },
}

pub enum EngineResponse {
    View(Box<GameView>),
}
