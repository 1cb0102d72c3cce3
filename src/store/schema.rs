use serde::{Deserialize, Serialize};

use crate::session::result::ScoreEntry;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreHistoryData {
    pub schema_version: u32,
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

impl Default for ScoreHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            scores: Vec::new(),
        }
    }
}

impl ScoreHistoryData {
    pub fn is_current(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}
