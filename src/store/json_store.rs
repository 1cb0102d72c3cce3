use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::session::result::ScoreEntry;
use crate::store::error::StoreError;
use crate::store::schema::{SCHEMA_VERSION, ScoreHistoryData};
use crate::store::ScoreStore;

const SCORES_FILE: &str = "scores.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// Store under the platform data directory.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_dir(default_data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn scores_path(&self) -> PathBuf {
        self.base_dir.join(SCORES_FILE)
    }

    /// Missing file means no history yet.
    fn load_history(&self) -> Result<ScoreHistoryData, StoreError> {
        let path = self.scores_path();
        if !path.exists() {
            return Ok(ScoreHistoryData::default());
        }
        let content = fs::read_to_string(&path)?;
        let data: ScoreHistoryData = serde_json::from_str(&content)?;
        if !data.is_current() {
            return Err(StoreError::UnsupportedSchema {
                found: data.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(data)
    }

    /// Write to a temp file then rename over the original.
    fn write_history(&self, data: &ScoreHistoryData) -> Result<(), StoreError> {
        let path = self.scores_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Moves an unreadable history aside so new runs can still be saved.
    fn quarantine(&self, err: &StoreError) -> Result<(), StoreError> {
        let path = self.scores_path();
        let aside = path.with_extension("json.corrupt");
        tracing::warn!(
            error = %err,
            path = %aside.display(),
            "score history unreadable, moving it aside"
        );
        fs::rename(&path, &aside)?;
        Ok(())
    }
}

impl ScoreStore for JsonStore {
    fn save(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        let mut data = match self.load_history() {
            Ok(data) => data,
            Err(err @ (StoreError::Json(_) | StoreError::UnsupportedSchema { .. })) => {
                self.quarantine(&err)?;
                ScoreHistoryData::default()
            }
            Err(err) => return Err(err),
        };
        data.scores.push(entry.clone());
        self.write_history(&data)
    }

    fn load_all(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.load_history()?.scores)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.write_history(&ScoreHistoryData::default())
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keypace")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::session::mode::TestConfig;
    use crate::session::result::RunResult;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn entry(wpm: f64) -> ScoreEntry {
        let config = TestConfig::WordsFixed { word_count: 25 };
        let mut result = RunResult::from_run(&config, &['a'], &['a'], 1.0);
        result.wpm = wpm;
        ScoreEntry::from_result(result, Utc::now())
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_dir, store) = make_test_store();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_appends_in_order() {
        let (_dir, mut store) = make_test_store();
        store.save(&entry(40.0)).unwrap();
        store.save(&entry(55.0)).unwrap();
        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].wpm, 40.0);
        assert_eq!(loaded[1].wpm, 55.0);
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let (dir, mut store) = make_test_store();
        store.save(&entry(40.0)).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_clear_empties_history() {
        let (_dir, mut store) = make_test_store();
        store.save(&entry(40.0)).unwrap();
        store.clear().unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported_then_quarantined_on_save() {
        let (dir, mut store) = make_test_store();
        fs::write(dir.path().join(SCORES_FILE), "{ not json").unwrap();
        assert!(matches!(store.load_all(), Err(StoreError::Json(_))));

        store.save(&entry(61.0)).unwrap();
        assert!(dir.path().join("scores.json.corrupt").exists());
        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].wpm, 61.0);
    }

    #[test]
    fn test_schema_version_rejection() {
        let (dir, store) = make_test_store();
        fs::write(
            dir.path().join(SCORES_FILE),
            r#"{"schema_version": 99, "scores": []}"#,
        )
        .unwrap();
        let err = store.load_all().unwrap_err();
        assert!(err.to_string().contains("99"));
    }
}
