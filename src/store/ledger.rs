use crate::session::mode::{Mode, TestConfig};
use crate::session::result::ScoreEntry;
use crate::store::error::StoreError;
use crate::store::{MemoryStore, ScoreStore};

/// Which runs an aggregate looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeFilter {
    #[default]
    All,
    Only(Mode),
}

impl ModeFilter {
    pub fn admits(self, mode: Mode) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Only(m) => m == mode,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ModeFilter::All => ModeFilter::Only(Mode::Sentence),
            ModeFilter::Only(Mode::Sentence) => ModeFilter::Only(Mode::Words),
            ModeFilter::Only(Mode::Words) => ModeFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModeFilter::All => "all",
            ModeFilter::Only(mode) => mode.as_str(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub avg_wpm: f64,
    pub avg_accuracy: f64,
    pub max_wpm: f64,
}

/// Append-only history of finished runs, mirrored into a `ScoreStore`.
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
    store: Box<dyn ScoreStore>,
}

impl ScoreLedger {
    /// Loads the existing history. An unreadable store starts an empty ledger.
    pub fn open(store: Box<dyn ScoreStore>) -> Self {
        let entries = match store.load_all() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "could not load score history, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = entries.len(), "score ledger opened");
        Self { entries, store }
    }

    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    /// Never rejects. A failed write is logged and the entry stays in memory.
    pub fn append(&mut self, entry: ScoreEntry) {
        if let Err(err) = self.store.save(&entry) {
            tracing::warn!(error = %err, id = %entry.id, "failed to persist score");
        } else {
            tracing::info!(id = %entry.id, mode = entry.mode.as_str(), wpm = entry.wpm, "score recorded");
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest wpm among exact configuration matches. On ties the earliest
    /// inserted entry wins.
    pub fn best_for(
        &self,
        mode: Mode,
        duration_secs: Option<f64>,
        word_count: Option<usize>,
    ) -> Option<&ScoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.matches(mode, duration_secs, word_count))
            .reduce(|best, cur| if cur.wpm > best.wpm { cur } else { best })
    }

    pub fn best_for_config(&self, config: &TestConfig) -> Option<&ScoreEntry> {
        self.best_for(config.mode(), config.duration_secs(), config.word_count())
    }

    /// Irreversible. Callers confirm with the user first.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        tracing::info!(count = self.entries.len(), "score history cleared");
        self.entries.clear();
        Ok(())
    }

    pub fn filter_by_mode(&self, filter: ModeFilter) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter().filter(move |e| filter.admits(e.mode))
    }

    pub fn summary(&self, filter: ModeFilter) -> Summary {
        let mut summary = Summary::default();
        let mut wpm_sum = 0.0;
        let mut acc_sum = 0.0;
        for entry in self.filter_by_mode(filter) {
            summary.count += 1;
            wpm_sum += entry.wpm;
            acc_sum += entry.accuracy;
            summary.max_wpm = summary.max_wpm.max(entry.wpm);
        }
        if summary.count > 0 {
            summary.avg_wpm = wpm_sum / summary.count as f64;
            summary.avg_accuracy = acc_sum / summary.count as f64;
        }
        summary
    }

    /// The most recent `limit` runs, oldest first.
    pub fn trend(&self, filter: ModeFilter, limit: usize) -> Vec<&ScoreEntry> {
        let mut recent = self.recent(filter, limit);
        recent.reverse();
        recent
    }

    /// The most recent `limit` runs, newest first.
    pub fn recent(&self, filter: ModeFilter, limit: usize) -> Vec<&ScoreEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| filter.admits(e.mode))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::session::result::RunResult;

    fn entry(config: TestConfig, wpm: f64, accuracy: f64) -> ScoreEntry {
        let mut result = RunResult::from_run(&config, &['a'], &['a'], 1.0);
        result.wpm = wpm;
        result.accuracy = accuracy;
        ScoreEntry::from_result(result, Utc::now())
    }

    const FIFTY: TestConfig = TestConfig::WordsFixed { word_count: 50 };

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn save(&mut self, _entry: &ScoreEntry) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
        fn load_all(&self) -> Result<Vec<ScoreEntry>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("unreadable")))
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn best_for_picks_max_wpm() {
        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(FIFTY, 50.0, 90.0));
        ledger.append(entry(FIFTY, 80.0, 90.0));
        ledger.append(entry(FIFTY, 65.0, 90.0));
        let best = ledger.best_for(Mode::Words, None, Some(50)).unwrap();
        assert_eq!(best.wpm, 80.0);
    }

    #[test]
    fn best_for_tie_keeps_earliest() {
        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(FIFTY, 70.0, 90.0));
        ledger.append(entry(FIFTY, 70.0, 99.0));
        let first_id = ledger.entries()[0].id.clone();
        assert_eq!(ledger.best_for_config(&FIFTY).unwrap().id, first_id);
    }

    #[test]
    fn best_for_exact_configuration_only() {
        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(TestConfig::WordsFixed { word_count: 25 }, 99.0, 90.0));
        ledger.append(entry(TestConfig::WordsTimed { duration_secs: 50.0 }, 98.0, 90.0));
        ledger.append(entry(TestConfig::Sentence, 97.0, 90.0));
        assert!(ledger.best_for(Mode::Words, None, Some(50)).is_none());
        assert!(ledger.best_for(Mode::Sentence, Some(15.0), None).is_none());
        assert_eq!(ledger.best_for(Mode::Sentence, None, None).unwrap().wpm, 97.0);
        assert_eq!(ledger.best_for(Mode::Words, Some(50.0), None).unwrap().wpm, 98.0);
    }

    #[test]
    fn best_for_empty_ledger_is_absent() {
        let ledger = ScoreLedger::in_memory();
        assert!(ledger.best_for(Mode::Words, None, Some(50)).is_none());
    }

    #[test]
    fn open_loads_existing_entries() {
        let store = MemoryStore::with_entries(vec![entry(FIFTY, 42.0, 95.0)]);
        let ledger = ScoreLedger::open(Box::new(store));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn append_survives_store_failure() {
        let mut ledger = ScoreLedger::open(Box::new(FailingStore));
        assert!(ledger.is_empty());
        ledger.append(entry(FIFTY, 42.0, 95.0));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn failed_clear_keeps_entries() {
        let mut ledger = ScoreLedger::open(Box::new(FailingStore));
        ledger.append(entry(FIFTY, 42.0, 95.0));
        assert!(ledger.clear().is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_empties_ledger() {
        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(FIFTY, 42.0, 95.0));
        ledger.clear().unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.best_for_config(&FIFTY).is_none());
    }

    #[test]
    fn summary_by_mode() {
        let mut ledger = ScoreLedger::in_memory();
        ledger.append(entry(FIFTY, 40.0, 90.0));
        ledger.append(entry(FIFTY, 60.0, 100.0));
        ledger.append(entry(TestConfig::Sentence, 100.0, 80.0));

        let words = ledger.summary(ModeFilter::Only(Mode::Words));
        assert_eq!(words.count, 2);
        assert_eq!(words.avg_wpm, 50.0);
        assert_eq!(words.avg_accuracy, 95.0);
        assert_eq!(words.max_wpm, 60.0);

        let all = ledger.summary(ModeFilter::All);
        assert_eq!(all.count, 3);
        assert_eq!(all.max_wpm, 100.0);

        assert_eq!(ScoreLedger::in_memory().summary(ModeFilter::All), Summary::default());
    }

    #[test]
    fn trend_and_recent_ordering() {
        let mut ledger = ScoreLedger::in_memory();
        for wpm in [10.0, 20.0, 30.0, 40.0] {
            ledger.append(entry(FIFTY, wpm, 90.0));
        }
        ledger.append(entry(TestConfig::Sentence, 99.0, 90.0));

        let trend: Vec<f64> = ledger
            .trend(ModeFilter::Only(Mode::Words), 3)
            .iter()
            .map(|e| e.wpm)
            .collect();
        assert_eq!(trend, vec![20.0, 30.0, 40.0]);

        let recent: Vec<f64> = ledger
            .recent(ModeFilter::All, 2)
            .iter()
            .map(|e| e.wpm)
            .collect();
        assert_eq!(recent, vec![99.0, 40.0]);
    }

    #[test]
    fn mode_filter_cycles() {
        let f = ModeFilter::default();
        assert_eq!(f.label(), "all");
        assert_eq!(f.next().label(), "sentence");
        assert_eq!(f.next().next().label(), "words");
        assert_eq!(f.next().next().next(), ModeFilter::All);
    }
}
