use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::metrics;
use crate::session::mode::{Mode, TestConfig};

/// Outcome of a completed run, before the ledger assigns identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub mode: Mode,
    pub duration_secs: Option<f64>,
    pub word_count: Option<usize>,
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub typed_count: usize,
    pub correct_count: usize,
}

impl RunResult {
    pub fn from_run(config: &TestConfig, typed: &[char], target: &[char], elapsed_secs: f64) -> Self {
        let correct = metrics::correct_count(typed, target);
        Self {
            mode: config.mode(),
            duration_secs: config.duration_secs(),
            word_count: config.word_count(),
            wpm: metrics::wpm(correct, elapsed_secs),
            accuracy: metrics::accuracy(correct, typed.len()),
            elapsed_secs,
            typed_count: typed.len(),
            correct_count: correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub mode: Mode,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub word_count: Option<usize>,
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
    pub typed_count: usize,
    pub correct_count: usize,
    pub created_at: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn from_result(result: RunResult, created_at: DateTime<Utc>) -> Self {
        let id = format!(
            "{:x}-{:08x}",
            created_at.timestamp_millis(),
            rand::random::<u32>()
        );
        Self {
            id,
            mode: result.mode,
            duration_secs: result.duration_secs,
            word_count: result.word_count,
            wpm: result.wpm,
            accuracy: result.accuracy,
            elapsed_secs: result.elapsed_secs,
            typed_count: result.typed_count,
            correct_count: result.correct_count,
            created_at,
        }
    }

    /// Exact match on the configuration triple; unset only equals unset.
    pub fn matches(&self, mode: Mode, duration_secs: Option<f64>, word_count: Option<usize>) -> bool {
        self.mode == mode && self.duration_secs == duration_secs && self.word_count == word_count
    }

    pub fn config(&self) -> Option<TestConfig> {
        TestConfig::from_parts(self.mode, self.duration_secs, self.word_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn from_run_carries_config_triple() {
        let config = TestConfig::WordsFixed { word_count: 25 };
        let result = RunResult::from_run(&config, &chars("ab"), &chars("abc"), 6.0);
        assert_eq!(result.mode, Mode::Words);
        assert_eq!(result.duration_secs, None);
        assert_eq!(result.word_count, Some(25));
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.typed_count, 2);
        assert_eq!(result.accuracy, 100.0);
        // 2 chars = 0.4 words in 0.1 minutes
        assert!((result.wpm - 4.0).abs() < 1e-9);
    }

    #[test]
    fn entry_ids_are_unique() {
        let config = TestConfig::Sentence;
        let result = RunResult::from_run(&config, &chars("a"), &chars("a"), 1.0);
        let now = Utc::now();
        let a = ScoreEntry::from_result(result.clone(), now);
        let b = ScoreEntry::from_result(result, now);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, now);
    }

    #[test]
    fn sentence_entry_never_matches_duration_query() {
        let result = RunResult::from_run(&TestConfig::Sentence, &chars("a"), &chars("a"), 1.0);
        let entry = ScoreEntry::from_result(result, Utc::now());
        assert!(entry.matches(Mode::Sentence, None, None));
        assert!(!entry.matches(Mode::Sentence, Some(15.0), None));
        assert!(!entry.matches(Mode::Words, None, None));
        assert_eq!(entry.config(), Some(TestConfig::Sentence));
    }

    #[test]
    fn entry_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "abc",
            "mode": "sentence",
            "wpm": 42.0,
            "accuracy": 97.5,
            "elapsed_secs": 8.2,
            "typed_count": 40,
            "correct_count": 39,
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let entry: ScoreEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.duration_secs, None);
        assert_eq!(entry.word_count, None);
        assert_eq!(entry.mode, Mode::Sentence);
    }
}
