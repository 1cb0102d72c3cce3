pub mod error;
pub mod json_store;
pub mod ledger;
pub mod schema;

pub use error::StoreError;
pub use json_store::JsonStore;
pub use ledger::{ModeFilter, ScoreLedger, Summary};

use crate::session::result::ScoreEntry;

/// Durable home of finished runs.
pub trait ScoreStore {
    fn save(&mut self, entry: &ScoreEntry) -> Result<(), StoreError>;
    fn load_all(&self) -> Result<Vec<ScoreEntry>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Keeps scores for the lifetime of the process only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<ScoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self { entries }
    }
}

impl ScoreStore for MemoryStore {
    fn save(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}
