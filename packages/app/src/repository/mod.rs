//! Item storage boundary
//!
//! The practice session and the import flow only see [`ItemRepository`];
//! the storage engine behind it belongs to the embedding application.
//! [`InMemoryRepository`] is the reference implementation used by the CLI
//! and the tests.

mod memory;

pub use memory::InMemoryRepository;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use vocab_algo::LearningItem;

// ============================================================
// 错误类型定义
// ============================================================

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("item not found: {0}")]
    NotFound(Uuid),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

// ============================================================
// 数据模型
// ============================================================

/// A learning item as persisted, with its storage identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub id: Uuid,
    pub list_id: String,
    pub created_at: DateTime<Utc>,
    pub item: LearningItem,
}

impl StoredItem {
    pub fn new(list_id: impl Into<String>, item: LearningItem, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id: list_id.into(),
            created_at,
            item,
        }
    }
}

/// Secondary indexes a repository must answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIndex {
    /// Every item of a list, oldest first
    List(String),
    /// Items with `next_review_at <= at`, earliest due first
    DueBefore(DateTime<Utc>),
}

// ============================================================
// Repository trait
// ============================================================

pub trait ItemRepository: Send + Sync {
    fn get(&self, id: Uuid) -> RepositoryResult<Option<StoredItem>>;

    /// Insert or replace by id
    fn put(&self, item: StoredItem) -> RepositoryResult<()>;

    /// Returns whether something was removed
    fn delete(&self, id: Uuid) -> RepositoryResult<bool>;

    fn query_by_index(&self, index: &ItemIndex) -> RepositoryResult<Vec<StoredItem>>;

    /// Like `get`, but a missing item is an error
    fn require(&self, id: Uuid) -> RepositoryResult<StoredItem> {
        self.get(id)?.ok_or(RepositoryError::NotFound(id))
    }
}
