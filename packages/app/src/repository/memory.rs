use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use super::{ItemIndex, ItemRepository, RepositoryResult, StoredItem};

/// Process-local repository; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<RwLock<HashMap<Uuid, StoredItem>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl ItemRepository for InMemoryRepository {
    fn get(&self, id: Uuid) -> RepositoryResult<Option<StoredItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    fn put(&self, item: StoredItem) -> RepositoryResult<()> {
        self.items.write().insert(item.id, item);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        Ok(self.items.write().remove(&id).is_some())
    }

    fn query_by_index(&self, index: &ItemIndex) -> RepositoryResult<Vec<StoredItem>> {
        let items = self.items.read();
        let mut matched: Vec<StoredItem> = match index {
            ItemIndex::List(list_id) => items
                .values()
                .filter(|stored| &stored.list_id == list_id)
                .cloned()
                .collect(),
            ItemIndex::DueBefore(at) => items
                .values()
                .filter(|stored| stored.item.review.next_review_at <= *at)
                .cloned()
                .collect(),
        };

        match index {
            ItemIndex::List(_) => matched.sort_by(|a, b| {
                a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
            }),
            ItemIndex::DueBefore(_) => matched.sort_by(|a, b| {
                a.item
                    .review
                    .next_review_at
                    .cmp(&b.item.review.next_review_at)
                    .then_with(|| a.created_at.cmp(&b.created_at))
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }

        Ok(matched)
    }
}
