use std::path::PathBuf;

use vocab_algo::LOW_CONFIDENCE_THRESHOLD;

use crate::grading::DEFAULT_SIMILARITY_THRESHOLD;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub file_logs: bool,
    pub log_dir: PathBuf,
    pub low_confidence_threshold: f64,
    pub session: SessionConfig,
    pub answer_similarity_threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Maximum cards per session
    pub batch_size: usize,
    pub shuffle: bool,
    /// Fixed seed for reproducible shuffles
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            shuffle: false,
            seed: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logs: false,
            log_dir: PathBuf::from("./logs"),
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            session: SessionConfig::default(),
            answer_similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

fn parse_ratio(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset or malformed values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let file_logs = lookup("ENABLE_FILE_LOGS")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.file_logs);

        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let low_confidence_threshold = lookup("LOW_CONFIDENCE_THRESHOLD")
            .and_then(|v| parse_ratio(&v))
            .unwrap_or(defaults.low_confidence_threshold);

        let batch_size = lookup("SESSION_BATCH_SIZE")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(defaults.session.batch_size);

        let shuffle = lookup("SESSION_SHUFFLE")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.session.shuffle);

        let seed = lookup("SESSION_SEED").and_then(|v| v.trim().parse::<u64>().ok());

        let answer_similarity_threshold = lookup("ANSWER_SIMILARITY_THRESHOLD")
            .and_then(|v| parse_ratio(&v))
            .unwrap_or(defaults.answer_similarity_threshold);

        Self {
            log_level,
            file_logs,
            log_dir,
            low_confidence_threshold,
            session: SessionConfig {
                batch_size,
                shuffle,
                seed,
            },
            answer_similarity_threshold,
        }
    }
}
