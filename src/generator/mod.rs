pub mod dictionary;
pub mod sentences;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::generator::dictionary::Dictionary;
use crate::generator::sentences::SentencePool;
use crate::session::mode::TestConfig;

/// Word count requested for timed runs, long enough to outlast the timer
/// for ordinary typing speeds.
pub const DEFAULT_TIMED_STREAM_WORDS: usize = 400;

/// Supplier of target text for new runs.
pub trait TextSource {
    fn next_sentence(&mut self) -> String;
    /// Space-joined lowercase words.
    fn build_word_stream(&mut self, count: usize) -> String;
}

/// Embedded English words and sentences.
pub struct PracticeText {
    dictionary: Dictionary,
    sentences: SentencePool,
    rng: SmallRng,
}

impl PracticeText {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            dictionary: Dictionary::load(),
            sentences: SentencePool::load(),
            rng,
        }
    }
}

impl Default for PracticeText {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PracticeText {
    fn next_sentence(&mut self) -> String {
        self.sentences.pick(&mut self.rng)
    }

    fn build_word_stream(&mut self, count: usize) -> String {
        self.dictionary.random_words(&mut self.rng, count).join(" ")
    }
}

/// Target text for a run of the given configuration.
pub fn build_target<S: TextSource + ?Sized>(
    source: &mut S,
    config: &TestConfig,
    timed_stream_words: usize,
) -> String {
    match *config {
        TestConfig::Sentence => source.next_sentence(),
        TestConfig::WordsFixed { word_count } => source.build_word_stream(word_count),
        TestConfig::WordsTimed { .. } => source.build_word_stream(timed_stream_words),
    }
}
