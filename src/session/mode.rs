use serde::{Deserialize, Serialize};

/// Mode name as recorded in the score ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sentence,
    Words,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Sentence => "sentence",
            Mode::Words => "words",
        }
    }
}

/// What a run asks the typist to do and when it ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TestConfig {
    /// One sentence, ends once it is fully typed.
    Sentence,
    /// Word stream against a countdown.
    WordsTimed { duration_secs: f64 },
    /// Fixed number of words, ends once all are typed.
    WordsFixed { word_count: usize },
}

impl TestConfig {
    pub fn timed(duration_secs: f64) -> Option<Self> {
        (duration_secs.is_finite() && duration_secs > 0.0)
            .then_some(TestConfig::WordsTimed { duration_secs })
    }

    pub fn fixed(word_count: usize) -> Option<Self> {
        (word_count > 0).then_some(TestConfig::WordsFixed { word_count })
    }

    pub fn mode(&self) -> Mode {
        match self {
            TestConfig::Sentence => Mode::Sentence,
            TestConfig::WordsTimed { .. } | TestConfig::WordsFixed { .. } => Mode::Words,
        }
    }

    pub fn duration_secs(&self) -> Option<f64> {
        match *self {
            TestConfig::WordsTimed { duration_secs } => Some(duration_secs),
            _ => None,
        }
    }

    pub fn word_count(&self) -> Option<usize> {
        match *self {
            TestConfig::WordsFixed { word_count } => Some(word_count),
            _ => None,
        }
    }

    /// Timed runs show a scrolling window instead of the whole target.
    pub fn is_windowed(&self) -> bool {
        matches!(self, TestConfig::WordsTimed { .. })
    }

    /// Rebuilds a config from the ledger triple. Inconsistent triples yield None.
    pub fn from_parts(
        mode: Mode,
        duration_secs: Option<f64>,
        word_count: Option<usize>,
    ) -> Option<Self> {
        match (mode, duration_secs, word_count) {
            (Mode::Sentence, None, None) => Some(TestConfig::Sentence),
            (Mode::Words, Some(d), None) => Self::timed(d),
            (Mode::Words, None, Some(n)) => Self::fixed(n),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            TestConfig::Sentence => "Sentence".to_string(),
            TestConfig::WordsTimed { duration_secs } => format!("Timed · {duration_secs}s"),
            TestConfig::WordsFixed { word_count } => format!("Words · {word_count}"),
        }
    }
}
