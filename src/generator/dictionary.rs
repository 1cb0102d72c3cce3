use rand::Rng;
use rand::seq::SliceRandom;

const WORDS_EN: &str = include_str!("../../assets/words-en.json");

pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn load() -> Self {
        let words: Vec<String> = serde_json::from_str(WORDS_EN).unwrap_or_default();

        // Lowercase ASCII only, so targets never need multi-byte handling
        let words = words
            .into_iter()
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
            .collect();

        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Random words with no immediate repeats.
    pub fn random_words<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(count);
        while out.len() < count {
            let Some(word) = self.words.choose(rng) else {
                break;
            };
            if self.words.len() > 1 && out.last() == Some(&word.as_str()) {
                continue;
            }
            out.push(word);
        }
        out
    }
}
