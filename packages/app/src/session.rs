//! Practice session runner
//!
//! Pulls the due cards of one list out of the repository, feeds each rating
//! through the scheduler and writes the new state straight back.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vocab_algo::{estimated_intervals, mastery_score, next_state, sanitize_state, UserRating};

use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use crate::grading::{grade_answer, AnswerGrade};
use crate::repository::{ItemIndex, ItemRepository, StoredItem};

/// Result of rating one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub item_id: Uuid,
    pub term: String,
    pub rating: UserRating,
    pub previous_interval_days: i64,
    pub interval_days: i64,
    pub next_review_at: DateTime<Utc>,
    pub mastery: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub reviewed: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// correct / reviewed, 0 when nothing was reviewed
    pub accuracy: f64,
}

pub struct PracticeSession<'a, R: ItemRepository + ?Sized> {
    repo: &'a R,
    list_id: String,
    queue: VecDeque<StoredItem>,
    outcomes: Vec<ReviewOutcome>,
}

impl<'a, R: ItemRepository + ?Sized> PracticeSession<'a, R> {
    /// Queue the cards of `list_id` due at `now`, most overdue first.
    ///
    /// Corrupted review state is repaired on load; the repaired state is
    /// what gets written back after rating.
    pub fn start(
        repo: &'a R,
        list_id: &str,
        config: &SessionConfig,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let mut due: Vec<StoredItem> = repo
            .query_by_index(&ItemIndex::DueBefore(now))?
            .into_iter()
            .filter(|stored| stored.list_id == list_id)
            .map(|mut stored| {
                let (repaired, report) = sanitize_state(&stored.item.review);
                if report.repaired() {
                    tracing::warn!(item_id = %stored.id, ?report, "repaired corrupted review state");
                    stored.item.review = repaired;
                }
                stored
            })
            .collect();

        due.sort_by(|a, b| {
            a.item
                .review
                .next_review_at
                .cmp(&b.item.review.next_review_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        due.truncate(config.batch_size.max(1));

        if config.shuffle {
            let seed = config.seed.unwrap_or_else(rand::random);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            due.shuffle(&mut rng);
        }

        tracing::info!(list_id, due = due.len(), "practice session started");

        Ok(Self {
            repo,
            list_id: list_id.to_string(),
            queue: due.into(),
            outcomes: Vec::new(),
        })
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// Card currently shown
    pub fn current(&self) -> Option<&StoredItem> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// What each rating would schedule for the current card
    pub fn preview(&self, now: DateTime<Utc>) -> Option<BTreeMap<UserRating, String>> {
        self.current()
            .map(|stored| estimated_intervals(&stored.item.review, now))
    }

    /// Apply `rating` to the current card, persist it and move on.
    pub fn rate(&mut self, rating: UserRating, now: DateTime<Utc>) -> AppResult<ReviewOutcome> {
        let original = self.queue.pop_front().ok_or(AppError::SessionFinished)?;
        let mut stored = original.clone();

        let previous_interval_days = stored.item.review.interval_days;
        stored.item.review = next_state(&stored.item.review, rating, now);

        let outcome = ReviewOutcome {
            item_id: stored.id,
            term: stored.item.term.clone(),
            rating,
            previous_interval_days,
            interval_days: stored.item.review.interval_days,
            next_review_at: stored.item.review.next_review_at,
            mastery: mastery_score(&stored.item.review),
        };

        if let Err(err) = self.repo.put(stored) {
            // keep the card so the rating can be retried
            self.queue.push_front(original);
            return Err(err.into());
        }

        tracing::debug!(
            item_id = %outcome.item_id,
            rating = %rating,
            interval_days = outcome.interval_days,
            "card rated"
        );

        self.outcomes.push(outcome.clone());
        Ok(outcome)
    }

    /// Grade a typed answer against the current card's definition and rate
    /// the card with the resulting rating.
    pub fn answer(
        &mut self,
        given: &str,
        threshold: f64,
        now: DateTime<Utc>,
    ) -> AppResult<(AnswerGrade, ReviewOutcome)> {
        let expected = self
            .current()
            .map(|stored| stored.item.definition.clone())
            .ok_or(AppError::SessionFinished)?;

        let grade = grade_answer(&expected, given, threshold);
        let outcome = self.rate(grade.rating, now)?;
        Ok((grade, outcome))
    }

    pub fn outcomes(&self) -> &[ReviewOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> SessionSummary {
        let reviewed = self.outcomes.len();
        let correct = self
            .outcomes
            .iter()
            .filter(|o| o.rating.is_passing())
            .count();
        let accuracy = if reviewed == 0 {
            0.0
        } else {
            correct as f64 / reviewed as f64
        };

        SessionSummary {
            reviewed,
            correct,
            incorrect: reviewed - correct,
            accuracy,
        }
    }
}
