use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::Viewport;
use crate::generator::DEFAULT_TIMED_STREAM_WORDS;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    #[serde(default = "default_visible_lines")]
    pub visible_lines: usize,
    #[serde(default = "default_timed_stream_words")]
    pub timed_stream_words: usize,
    #[serde(default = "default_durations")]
    pub durations: Vec<u32>,
    #[serde(default = "default_word_counts")]
    pub word_counts: Vec<usize>,
    #[serde(default = "default_trend_limit")]
    pub trend_limit: usize,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_line_width() -> usize {
    60
}
fn default_visible_lines() -> usize {
    3
}
fn default_timed_stream_words() -> usize {
    DEFAULT_TIMED_STREAM_WORDS
}
fn default_durations() -> Vec<u32> {
    vec![15, 30, 60]
}
fn default_word_counts() -> Vec<usize> {
    vec![25, 50, 100]
}
fn default_trend_limit() -> usize {
    50
}
fn default_recent_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate_ms(),
            line_width: default_line_width(),
            visible_lines: default_visible_lines(),
            timed_stream_words: default_timed_stream_words(),
            durations: default_durations(),
            word_counts: default_word_counts(),
            trend_limit: default_trend_limit(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keypace")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Clamp hand-edited values back into range.
    pub fn validate(&mut self) {
        self.tick_rate_ms = self.tick_rate_ms.clamp(10, 1000);
        self.line_width = self.line_width.clamp(20, 200);
        self.visible_lines = self.visible_lines.clamp(1, 9);
        if self.visible_lines % 2 == 0 {
            self.visible_lines += 1;
        }
        self.timed_stream_words = self.timed_stream_words.max(50);
        self.durations.retain(|&d| d > 0);
        if self.durations.is_empty() {
            self.durations = default_durations();
        }
        self.word_counts.retain(|&n| n > 0);
        if self.word_counts.is_empty() {
            self.word_counts = default_word_counts();
        }
        self.trend_limit = self.trend_limit.max(1);
        self.recent_limit = self.recent_limit.max(1);
    }

    /// Window for timed runs, narrowed to fit the available columns.
    pub fn viewport(&self, available_width: usize) -> Viewport {
        Viewport::new(self.line_width.min(available_width), self.visible_lines)
    }
}
