use serde::{Deserialize, Serialize};

/// What happened when the engine tried to resolve a player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// State changed and the turn advanced (or the action is free, like checking pockets).
    Applied,
    /// The player could not do it right now; a Block line was logged, no turn passed.
    Blocked { reason: String },
    /// Not offered here. Nothing was logged or changed.
    Rejected { reason: String },
    /// Listed by the location but has no resolver yet.
    Deferred { reason: String },
}

