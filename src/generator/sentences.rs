use rand::Rng;

const SENTENCES_EN: &str = include_str!("../../assets/sentences-en.json");

const FALLBACK_SENTENCE: &str = "The quick brown fox jumps over the lazy dog.";

pub struct SentencePool {
    sentences: Vec<String>,
    last_idx: Option<usize>,
}

impl SentencePool {
    pub fn load() -> Self {
        let sentences: Vec<String> = serde_json::from_str(SENTENCES_EN).unwrap_or_default();
        let sentences = sentences
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            sentences,
            last_idx: None,
        }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Random sentence, different from the previous pick when possible.
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> String {
        if self.sentences.is_empty() {
            return FALLBACK_SENTENCE.to_string();
        }
        let mut idx = rng.gen_range(0..self.sentences.len());
        if self.sentences.len() > 1 && Some(idx) == self.last_idx {
            idx = (idx + 1) % self.sentences.len();
        }
        self.last_idx = Some(idx);
        self.sentences[idx].clone()
    }
}
