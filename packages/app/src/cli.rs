use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use vocab_algo::{
    default_state, estimated_intervals, mastery_score, ReviewState, DEFAULT_EASE_FACTOR,
};

use crate::config::Config;
use crate::error::AppResult;
use crate::import::{review_text, ImportReview};

#[derive(Debug, Parser)]
#[command(name = "vocab", version, about = "Spaced-repetition scheduling and word-pair extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract term/definition pairs from a recognized-text file
    Extract {
        file: PathBuf,

        /// Print the import review as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what each rating would schedule for a card
    Preview {
        #[arg(long, default_value_t = DEFAULT_EASE_FACTOR)]
        ease: f64,

        /// Current interval in days
        #[arg(long, default_value_t = 0)]
        interval: i64,

        /// Consecutive successful reviews
        #[arg(long, default_value_t = 0)]
        repetitions: u32,
    },
}

pub fn run<W: Write>(cli: Cli, config: &Config, out: &mut W, now: DateTime<Utc>) -> AppResult<()> {
    match cli.command {
        Command::Extract { file, json } => {
            let text = std::fs::read_to_string(&file)?;
            let review = review_text(&text, config.low_confidence_threshold);
            tracing::info!(
                file = %file.display(),
                pairs = review.rows.len(),
                unparsed = review.unparsed_lines.len(),
                "extracted"
            );

            if json {
                serde_json::to_writer_pretty(&mut *out, &review)?;
                writeln!(out)?;
            } else {
                write_review(&review, out)?;
            }
        }
        Command::Preview {
            ease,
            interval,
            repetitions,
        } => {
            let state = preview_state(ease, interval, repetitions, now);
            for (rating, label) in estimated_intervals(&state, now) {
                writeln!(out, "{:<6} {label}", rating.as_str())?;
            }
            writeln!(out, "mastery {}", mastery_score(&state))?;
        }
    }
    Ok(())
}

/// A card that has passed `repetitions` reviews in a row
fn preview_state(ease: f64, interval: i64, repetitions: u32, now: DateTime<Utc>) -> ReviewState {
    ReviewState {
        ease_factor: ease,
        interval_days: interval,
        repetitions,
        times_correct: repetitions,
        last_reviewed_at: (repetitions > 0).then_some(now),
        ..default_state(now)
    }
}

fn write_review<W: Write>(review: &ImportReview, out: &mut W) -> std::io::Result<()> {
    for row in &review.rows {
        let flag = if row.needs_attention { "?" } else { " " };
        writeln!(
            out,
            "{flag} {} = {} ({:.2})",
            row.term, row.definition, row.confidence
        )?;
    }

    if !review.unparsed_lines.is_empty() {
        writeln!(out, "unparsed:")?;
        for line in &review.unparsed_lines {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &Config::default(), &mut out, Utc::now()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_preview_defaults() {
        let output = run_to_string(&["vocab", "preview"]);
        assert!(output.contains("again  1 day"));
        assert!(output.contains("good   1 day"));
        assert!(output.contains("mastery 0"));
    }

    #[test]
    fn test_preview_mature_card() {
        let output = run_to_string(&[
            "vocab",
            "preview",
            "--ease",
            "2.5",
            "--interval",
            "6",
            "--repetitions",
            "2",
        ]);
        assert!(output.contains("good   15 days"));
        assert!(output.contains("hard   1 day"));
    }

    #[test]
    fn test_preview_max_repetitions() {
        let output = run_to_string(&["vocab", "preview", "--repetitions", "4294967295"]);
        assert!(output.contains("good   1 day"));
        assert!(output.contains("mastery 75"));
    }

    #[test]
    fn test_extract_text_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Woordenlijst\nHond - Chien\nasdf1 - asdf2\nxyzxyzxyzxyzxyz\n").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let output = run_to_string(&["vocab", "extract", &path]);

        assert!(output.contains("  Hond = Chien (1.00)"));
        assert!(output.contains("? asdf1 = asdf2"));
        assert!(output.contains("unparsed:\n  xyzxyzxyzxyzxyz"));
    }

    #[test]
    fn test_extract_json_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Kat - Chat").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let output = run_to_string(&["vocab", "extract", &path, "--json"]);
        let review: ImportReview = serde_json::from_str(&output).unwrap();

        assert_eq!(review.rows.len(), 1);
        assert_eq!(review.rows[0].definition, "Chat");
    }

    #[test]
    fn test_extract_missing_file() {
        let cli = Cli::try_parse_from(["vocab", "extract", "/no/such/file.txt"]).unwrap();
        let err = run(cli, &Config::default(), &mut Vec::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Io(_)));
    }
}
