// src/repositories/set_repository.rs
//
// Set persistence. Sets are keyed by their publisher code.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::CardSet;
use crate::error::AppResult;
use crate::repositories::entity_container::{ContainerOrigin, EntityContainer};

pub trait SetRepository: Send + Sync {
    /// True when no snapshot existed at open time (or after a reset)
    fn needs_bootstrap(&self) -> bool;
    /// All sets in ascending release order
    fn list_all(&self) -> Vec<CardSet>;
    fn get_by_code(&self, code: &str) -> Option<CardSet>;
    /// Chronologically latest set
    fn latest(&self) -> Option<CardSet>;
    fn update(&self, code: &str, set: CardSet) -> AppResult<()>;
    fn replace_all(&self, sets: Vec<CardSet>) -> AppResult<()>;
    fn reset(&self) -> AppResult<()>;
    fn len(&self) -> usize;
}

pub struct FileSetRepository {
    container: RwLock<EntityContainer<CardSet>>,
}

impl FileSetRepository {
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        Ok(Self {
            container: RwLock::new(EntityContainer::open(path)?),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityContainer<CardSet>> {
        self.container.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityContainer<CardSet>> {
        self.container.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SetRepository for FileSetRepository {
    fn needs_bootstrap(&self) -> bool {
        let container = self.read();
        container.origin() == ContainerOrigin::Fresh && container.is_empty()
    }

    fn list_all(&self) -> Vec<CardSet> {
        self.read().sorted_snapshot()
    }

    fn get_by_code(&self, code: &str) -> Option<CardSet> {
        self.read().get_by_key(&code.to_string())
    }

    fn latest(&self) -> Option<CardSet> {
        self.read().last_in_order()
    }

    fn update(&self, code: &str, set: CardSet) -> AppResult<()> {
        self.write().update(&code.to_string(), set)
    }

    fn replace_all(&self, sets: Vec<CardSet>) -> AppResult<()> {
        self.write().replace_all(sets)
    }

    fn reset(&self) -> AppResult<()> {
        self.write().reset()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_repository_needs_bootstrap() {
        let dir = tempdir().unwrap();
        let repo = FileSetRepository::open(dir.path().join("setdata")).unwrap();
        assert!(repo.needs_bootstrap());

        repo.replace_all(vec![CardSet::new(
            "Limited Edition Alpha",
            "LEA",
            NaiveDate::from_ymd_opt(1993, 8, 5),
        )])
        .unwrap();
        assert!(!repo.needs_bootstrap());

        let reopened = FileSetRepository::open(dir.path().join("setdata")).unwrap();
        assert!(!reopened.needs_bootstrap());
        assert_eq!(reopened.get_by_code("LEA").unwrap().name, "Limited Edition Alpha");
    }
}
