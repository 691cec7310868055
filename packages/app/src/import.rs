//! Photographed-list import
//!
//! image -> [`ImagePreprocessor`] -> [`TextRecognizer`] -> `extract` ->
//! [`ImportReview`] (user confirms, edits, discards) -> repository.
//!
//! Pre-processing and recognition are interfaces only; the embedding
//! application supplies the engines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vocab_algo::{extract, CandidatePair, ExtractionResult, LearningItem};

use crate::error::{AppError, AppResult};
use crate::repository::{ItemRepository, StoredItem};

// ============================================================
// 外部识别服务接口
// ============================================================

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognition cancelled")]
    Cancelled,

    #[error("image could not be decoded: {0}")]
    InvalidImage(String),

    #[error("recognition engine failed: {0}")]
    Engine(String),
}

/// Progress callback payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionProgress {
    /// 0-100
    pub percent: u8,
    pub status: String,
}

impl RecognitionProgress {
    pub fn new(percent: u8, status: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            status: status.into(),
        }
    }
}

/// Shared cancellation flag for a running recognition
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Upscale, convert to grayscale and raise contrast (or threshold) an image
/// before recognition.
pub trait ImagePreprocessor {
    fn preprocess(&self, image: &[u8]) -> Result<Vec<u8>, RecognitionError>;
}

/// Text recognition engine. Implementations should report progress and
/// return `RecognitionError::Cancelled` once `cancel` is set.
pub trait TextRecognizer {
    fn recognize(
        &self,
        image: &[u8],
        progress: &mut dyn FnMut(RecognitionProgress),
        cancel: &CancelFlag,
    ) -> Result<String, RecognitionError>;
}

/// Run pre-processing and recognition, then extract pairs from the text.
pub fn recognize_and_extract(
    image: &[u8],
    preprocessor: &dyn ImagePreprocessor,
    recognizer: &dyn TextRecognizer,
    progress: &mut dyn FnMut(RecognitionProgress),
    cancel: &CancelFlag,
) -> AppResult<ExtractionResult> {
    let prepared = preprocessor.preprocess(image)?;
    if cancel.is_cancelled() {
        return Err(RecognitionError::Cancelled.into());
    }

    let text = recognizer.recognize(&prepared, progress, cancel)?;
    let result = extract(&text);
    tracing::info!(
        pairs = result.pairs.len(),
        unparsed = result.unparsed_lines.len(),
        "extracted word pairs from image"
    );
    Ok(result)
}

// ============================================================
// 导入确认
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrigin {
    Extracted,
    /// Typed in by the user, usually from an unparsed line
    Manual,
}

/// One pair awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    pub term: String,
    pub definition: String,
    pub confidence: f64,
    /// Low confidence, should be checked before accepting
    pub needs_attention: bool,
    pub accepted: bool,
    pub origin: RowOrigin,
}

/// Editable result of an extraction, committed once the user is done
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReview {
    pub rows: Vec<ReviewRow>,
    /// Lines offered for manual re-entry
    pub unparsed_lines: Vec<String>,
}

fn validate_pair(term: &str, definition: &str) -> AppResult<(String, String)> {
    let term = term.trim();
    let definition = definition.trim();
    if term.is_empty() || definition.is_empty() {
        return Err(AppError::Validation(
            "term and definition must not be empty".to_string(),
        ));
    }
    Ok((term.to_string(), definition.to_string()))
}

impl ImportReview {
    /// Every pair starts accepted; pairs under `low_confidence_threshold` are
    /// flagged.
    pub fn from_extraction(result: ExtractionResult, low_confidence_threshold: f64) -> Self {
        let rows = result
            .pairs
            .into_iter()
            .map(|CandidatePair { term, definition, confidence }| ReviewRow {
                needs_attention: confidence < low_confidence_threshold,
                term,
                definition,
                confidence,
                accepted: true,
                origin: RowOrigin::Extracted,
            })
            .collect();

        Self {
            rows,
            unparsed_lines: result.unparsed_lines,
        }
    }

    fn row_mut(&mut self, index: usize) -> AppResult<&mut ReviewRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("row {index} out of range (0..{len})")))
    }

    /// Replace a row's text. An edited row counts as confirmed.
    pub fn edit(&mut self, index: usize, term: &str, definition: &str) -> AppResult<()> {
        let (term, definition) = validate_pair(term, definition)?;
        let row = self.row_mut(index)?;
        row.term = term;
        row.definition = definition;
        row.needs_attention = false;
        row.accepted = true;
        Ok(())
    }

    pub fn discard(&mut self, index: usize) -> AppResult<()> {
        self.row_mut(index)?.accepted = false;
        Ok(())
    }

    /// Add a pair typed by the user, optionally resolving an unparsed line.
    pub fn add_manual(
        &mut self,
        term: &str,
        definition: &str,
        resolves_unparsed: Option<usize>,
    ) -> AppResult<()> {
        let (term, definition) = validate_pair(term, definition)?;
        if let Some(line) = resolves_unparsed {
            if line >= self.unparsed_lines.len() {
                return Err(AppError::Validation(format!(
                    "unparsed line {line} out of range (0..{})",
                    self.unparsed_lines.len()
                )));
            }
            self.unparsed_lines.remove(line);
        }

        self.rows.push(ReviewRow {
            term,
            definition,
            confidence: 1.0,
            needs_attention: false,
            accepted: true,
            origin: RowOrigin::Manual,
        });
        Ok(())
    }

    pub fn accepted(&self) -> impl Iterator<Item = &ReviewRow> {
        self.rows.iter().filter(|row| row.accepted)
    }

    pub fn attention_count(&self) -> usize {
        self.accepted().filter(|row| row.needs_attention).count()
    }

    /// Turn every accepted row into a new item due at `now` and persist it.
    pub fn commit<R: ItemRepository + ?Sized>(
        &self,
        repo: &R,
        list_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<StoredItem>> {
        let mut created = Vec::new();
        for row in self.accepted() {
            let stored = StoredItem::new(
                list_id,
                LearningItem::new(row.term.clone(), row.definition.clone(), now),
                now,
            );
            repo.put(stored.clone())?;
            created.push(stored);
        }

        tracing::info!(list_id, created = created.len(), "import committed");
        Ok(created)
    }
}

/// Extract raw text into a review in one step.
pub fn review_text(raw_text: &str, low_confidence_threshold: f64) -> ImportReview {
    ImportReview::from_extraction(extract(raw_text), low_confidence_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryRepository, ItemIndex};

    struct FixedRecognizer(&'static str);

    impl TextRecognizer for FixedRecognizer {
        fn recognize(
            &self,
            _image: &[u8],
            progress: &mut dyn FnMut(RecognitionProgress),
            cancel: &CancelFlag,
        ) -> Result<String, RecognitionError> {
            progress(RecognitionProgress::new(0, "loading"));
            if cancel.is_cancelled() {
                return Err(RecognitionError::Cancelled);
            }
            progress(RecognitionProgress::new(100, "done"));
            Ok(self.0.to_string())
        }
    }

    struct Passthrough;

    impl ImagePreprocessor for Passthrough {
        fn preprocess(&self, image: &[u8]) -> Result<Vec<u8>, RecognitionError> {
            if image.is_empty() {
                return Err(RecognitionError::InvalidImage("empty".into()));
            }
            Ok(image.to_vec())
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(RecognitionProgress::new(250, "x").percent, 100);
    }

    #[test]
    fn test_recognize_and_extract() {
        let mut seen = Vec::new();
        let result = recognize_and_extract(
            b"png",
            &Passthrough,
            &FixedRecognizer("Woord\nHond - Chien\nKat - Chat"),
            &mut |p| seen.push(p.percent),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(result.pairs.len(), 2);
        assert_eq!(seen, vec![0, 100]);
    }

    #[test]
    fn test_recognition_cancelled() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let err = recognize_and_extract(
            b"png",
            &Passthrough,
            &FixedRecognizer("Hond - Chien"),
            &mut |_| {},
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Recognition(RecognitionError::Cancelled)));
    }

    #[test]
    fn test_preprocess_failure_surfaces() {
        let err = recognize_and_extract(
            b"",
            &Passthrough,
            &FixedRecognizer("Hond - Chien"),
            &mut |_| {},
            &CancelFlag::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Recognition(RecognitionError::InvalidImage(_))));
    }

    #[test]
    fn test_low_confidence_flagged() {
        let review = review_text("Hond - Chien\nasdf1 - asdf2\nxyzxyzxyzxyzxyz", 0.7);
        assert_eq!(review.rows.len(), 2);
        assert!(!review.rows[0].needs_attention);
        assert!(review.rows[1].needs_attention);
        assert_eq!(review.attention_count(), 1);
        assert_eq!(review.unparsed_lines, vec!["xyzxyzxyzxyzxyz".to_string()]);
    }

    #[test]
    fn test_edit_discard_manual() {
        let mut review = review_text("Hond - Chien\nasdf1 - asdf2\nxyzxyzxyzxyzxyz", 0.7);

        review.edit(1, "vis", "poisson").unwrap();
        assert!(!review.rows[1].needs_attention);
        review.discard(0).unwrap();
        review.add_manual("vogel", "oiseau", Some(0)).unwrap();

        let accepted: Vec<&str> = review.accepted().map(|r| r.term.as_str()).collect();
        assert_eq!(accepted, vec!["vis", "vogel"]);
        assert!(review.unparsed_lines.is_empty());
        assert_eq!(review.rows[2].origin, RowOrigin::Manual);
    }

    #[test]
    fn test_invalid_edits_rejected() {
        let mut review = review_text("Hond - Chien", 0.7);
        assert!(matches!(review.edit(0, " ", "chien"), Err(AppError::Validation(_))));
        assert!(matches!(review.edit(5, "a", "b"), Err(AppError::Validation(_))));
        assert!(matches!(review.discard(9), Err(AppError::Validation(_))));
        assert!(matches!(
            review.add_manual("a", "b", Some(0)),
            Err(AppError::Validation(_))
        ));
        assert_eq!(review.rows[0].term, "Hond");
    }

    #[test]
    fn test_commit_creates_default_items() {
        let repo = InMemoryRepository::new();
        let now = Utc::now();
        let mut review = review_text("Hond - Chien\nKat - Chat", 0.7);
        review.discard(1).unwrap();

        let created = review.commit(&repo, "nl-fr", now).unwrap();
        assert_eq!(created.len(), 1);

        let stored = repo.query_by_index(&ItemIndex::List("nl-fr".into())).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].item.term, "Hond");
        assert_eq!(stored[0].item.review, vocab_algo::default_state(now));
    }
}
