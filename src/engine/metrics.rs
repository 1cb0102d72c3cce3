/// Average word length used to convert characters into words.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveMetrics {
    pub elapsed_secs: f64,
    pub typed_count: usize,
    pub correct_count: usize,
    pub wpm: f64,
    pub accuracy: f64,
    pub remaining_secs: Option<f64>,
}

impl LiveMetrics {
    pub fn compute(
        typed: &[char],
        target: &[char],
        elapsed_secs: f64,
        duration_secs: Option<f64>,
    ) -> Self {
        let elapsed_secs = elapsed_secs.max(0.0);
        let correct = correct_count(typed, target);
        Self {
            elapsed_secs,
            typed_count: typed.len(),
            correct_count: correct,
            wpm: wpm(correct, elapsed_secs),
            accuracy: accuracy(correct, typed.len()),
            remaining_secs: remaining(duration_secs, elapsed_secs),
        }
    }
}

/// Positions where the typed character matches the target at the same index.
pub fn correct_count(typed: &[char], target: &[char]) -> usize {
    typed
        .iter()
        .zip(target.iter())
        .filter(|(t, e)| t == e)
        .count()
}

pub fn wpm(correct: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    (correct as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)
}

/// Nothing typed yet counts as full accuracy.
pub fn accuracy(correct: usize, typed_len: usize) -> f64 {
    if typed_len == 0 {
        return 100.0;
    }
    (correct as f64 / typed_len as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn remaining(duration_secs: Option<f64>, elapsed_secs: f64) -> Option<f64> {
    duration_secs.map(|d| (d - elapsed_secs).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_correct_count_is_positional() {
        assert_eq!(correct_count(&chars("abc"), &chars("abd")), 2);
        assert_eq!(correct_count(&chars("bac"), &chars("abc")), 1);
        assert_eq!(correct_count(&chars(""), &chars("anything")), 0);
    }

    #[test]
    fn test_correct_count_bounded_by_shorter_input() {
        let cases = [("hello world", "hello"), ("he", "hello"), ("xyz", "")];
        for (typed, target) in cases {
            let typed = chars(typed);
            let target = chars(target);
            assert!(correct_count(&typed, &target) <= typed.len().min(target.len()));
        }
    }

    #[test]
    fn test_wpm_zero_without_elapsed_time() {
        assert_eq!(wpm(50, 0.0), 0.0);
        assert_eq!(wpm(50, -3.0), 0.0);
    }

    #[test]
    fn test_wpm_formula() {
        // 50 correct chars = 10 words in half a minute
        assert!((wpm(50, 30.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_wpm_strictly_increases_with_correct_count() {
        let mut last = wpm(0, 12.5);
        for correct in 1..200 {
            let next = wpm(correct, 12.5);
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_accuracy_vacuous_and_bounded() {
        assert_eq!(accuracy(0, 0), 100.0);
        assert_eq!(accuracy(0, 4), 0.0);
        assert_eq!(accuracy(4, 4), 100.0);
        assert!((accuracy(10, 11) - 90.909_090).abs() < 1e-3);
    }

    #[test]
    fn test_remaining_only_with_duration() {
        assert_eq!(remaining(None, 10.0), None);
        assert_eq!(remaining(Some(15.0), 10.0), Some(5.0));
        assert_eq!(remaining(Some(15.0), 15.0), Some(0.0));
        assert_eq!(remaining(Some(15.0), 40.0), Some(0.0));
    }

    #[test]
    fn test_compute_clamps_negative_elapsed() {
        let m = LiveMetrics::compute(&chars("ab"), &chars("ab"), -1.0, Some(10.0));
        assert_eq!(m.elapsed_secs, 0.0);
        assert_eq!(m.wpm, 0.0);
        assert_eq!(m.remaining_secs, Some(10.0));
        assert_eq!(m.correct_count, 2);
        assert_eq!(m.typed_count, 2);
    }
}
