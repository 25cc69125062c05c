use serde::{Deserialize, Serialize};

/// Category shown next to a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogTag {
    Status,
    Block,
    Move,
    Search,
    Rest,
    Craft,
    Scout,
    Talk,
    Inventory,
    System,
    Intro,
    Class,
    Debug,
}

impl LogTag {
    pub const ALL: [LogTag; 13] = [
        LogTag::Status,
        LogTag::Block,
        LogTag::Move,
        LogTag::Search,
        LogTag::Rest,
        LogTag::Craft,
        LogTag::Scout,
        LogTag::Talk,
        LogTag::Inventory,
        LogTag::System,
        LogTag::Intro,
        LogTag::Class,
        LogTag::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogTag::Status => "Status",
            LogTag::Block => "Block",
            LogTag::Move => "Move",
            LogTag::Search => "Search",
            LogTag::Rest => "Rest",
            LogTag::Craft => "Craft",
            LogTag::Scout => "Scout",
            LogTag::Talk => "Talk",
            LogTag::Inventory => "Inventory",
            LogTag::System => "System",
            LogTag::Intro => "Intro",
            LogTag::Class => "Class",
            LogTag::Debug => "Debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub tag: LogTag,
    /// Wall-clock milliseconds when the line was written.
    pub t: i64,
}

impl LogEntry {
    pub fn now(text: impl Into<String>, tag: LogTag) -> Self {
        Self {
            text: text.into(),
            tag,
            t: chrono::Utc::now().timestamp_millis(),
        }
    }
}
