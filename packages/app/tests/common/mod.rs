#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use vocab_algo::LearningItem;
use vocab_app::repository::{
    InMemoryRepository, ItemIndex, ItemRepository, RepositoryError, RepositoryResult, StoredItem,
};

pub const LIST_ID: &str = "nl-fr";

pub const SAMPLE_PAGE: &str = "Woordenlijst\r\n\
1. Hond - Chien\r\n\
2. Kat – Chat\r\n\
de vis = le poisson\r\n\
het huis : la maison\r\n\
asdf1 - asdf2\r\n\
onleesbare regel zonder scheiding\r\n";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()
}

/// One item per `(term, definition, due_in)`, created a minute apart and due
/// `due_in` days from `t0()` (negative means overdue).
pub fn seeded_repo(terms: &[(&str, &str, i64)]) -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    for (i, (term, definition, due_in)) in terms.iter().enumerate() {
        let created = t0() - Duration::days(30) + Duration::minutes(i as i64);
        let mut item = LearningItem::new(*term, *definition, created);
        item.review.next_review_at = t0() + Duration::days(*due_in);
        repo.put(StoredItem::new(LIST_ID, item, created)).unwrap();
    }
    repo
}

/// Wraps a repository, records every index query and fails every write while
/// `fail_writes` is set.
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: InMemoryRepository,
    pub fail_writes: AtomicBool,
    pub queries: Mutex<Vec<ItemIndex>>,
}

impl FlakyRepository {
    pub fn new(inner: InMemoryRepository) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }
}

impl ItemRepository for FlakyRepository {
    fn get(&self, id: Uuid) -> RepositoryResult<Option<StoredItem>> {
        self.inner.get(id)
    }

    fn put(&self, item: StoredItem) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("disk full".into()));
        }
        self.inner.put(item)
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.inner.delete(id)
    }

    fn query_by_index(&self, index: &ItemIndex) -> RepositoryResult<Vec<StoredItem>> {
        self.queries.lock().push(index.clone());
        self.inner.query_by_index(index)
    }
}
