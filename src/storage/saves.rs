use chrono::{SecondsFormat, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::game_save::SaveSummary;
use crate::model::game_state::GameState;
use crate::model::world::World;
use crate::storage::kv::{KeyValueStore, StorageError};

pub const STORAGE_INDEX_KEY: &str = "textRpgSavesIndex_v1";
pub const STORAGE_SAVE_PREFIX: &str = "textRpgSave_v1__";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save '{0}' is not in the index")]
    NotFound(String),

    #[error("save data for '{0}' is missing")]
    Missing(String),

    #[error("save data for '{id}' is corrupted: {source}")]
    Corrupted {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode save: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn save_key(id: &str) -> String {
    format!("{STORAGE_SAVE_PREFIX}{id}")
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn make_id() -> String {
    let random: u64 = rand::thread_rng().gen_range(0..(1u64 << 52));
    format!("{:x}-{:x}", random, Utc::now().timestamp_millis())
}

/// Named save slots on top of a key/value store: one key for the index,
/// one key per slot holding the serialized state.
pub struct SaveManager {
    store: Box<dyn KeyValueStore>,
}

impl SaveManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Newest first. An unreadable index reads as empty.
    pub fn list(&self) -> Vec<SaveSummary> {
        let raw = match self.store.get(STORAGE_INDEX_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "save_index_unreadable");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, "save_index_corrupted");
            Vec::new()
        })
    }

    fn write_index(&mut self, index: &[SaveSummary]) -> Result<(), SaveError> {
        let json = serde_json::to_string(index)?;
        self.store.set(STORAGE_INDEX_KEY, &json)?;
        Ok(())
    }

    fn write_state(&mut self, id: &str, state: &GameState) -> Result<(), SaveError> {
        let json = serde_json::to_string(state)?;
        self.store.set(&save_key(id), &json)?;
        Ok(())
    }

    pub fn save_new(
        &mut self,
        state: &GameState,
        world: &World,
        label: &str,
    ) -> Result<SaveSummary, SaveError> {
        let mut index = self.list();
        let id = make_id();
        let created_at = now_rfc3339();

        self.write_state(&id, state)?;
        let summary = SaveSummary::describe(state, world, &id, label, &created_at, &created_at);
        index.insert(0, summary.clone());
        self.write_index(&index)?;

        debug!(id = %summary.id, label = %summary.label, "save_created");
        Ok(summary)
    }

    /// Rewrite an existing slot in place. A blank `label` keeps the old one.
    pub fn overwrite(
        &mut self,
        id: &str,
        state: &GameState,
        world: &World,
        label: Option<&str>,
    ) -> Result<SaveSummary, SaveError> {
        let mut index = self.list();
        let Some(pos) = index.iter().position(|s| s.id == id) else {
            return Err(SaveError::NotFound(id.to_string()));
        };

        self.write_state(id, state)?;

        let label = match label.map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => index[pos].label.clone(),
        };
        let updated = SaveSummary::describe(
            state,
            world,
            id,
            &label,
            &index[pos].created_at,
            &now_rfc3339(),
        );
        index[pos] = updated.clone();
        self.write_index(&index)?;

        debug!(id, label = %updated.label, "save_overwritten");
        Ok(updated)
    }

    pub fn load(&self, id: &str) -> Result<GameState, SaveError> {
        let raw = self
            .store
            .get(&save_key(id))?
            .ok_or_else(|| SaveError::Missing(id.to_string()))?;

        serde_json::from_str(&raw).map_err(|source| SaveError::Corrupted {
            id: id.to_string(),
            source,
        })
    }

    /// Drop a slot and its index entry. Returns what is left of the index.
    ///
    /// The index is rewritten before the payload goes, so a failed write
    /// never leaves an entry pointing at nothing.
    pub fn delete(&mut self, id: &str) -> Result<Vec<SaveSummary>, SaveError> {
        let mut index = self.list();
        index.retain(|s| s.id != id);
        self.write_index(&index)?;

        self.store.remove(&save_key(id))?;

        debug!(id, remaining = index.len(), "save_deleted");
        Ok(index)
    }
}
