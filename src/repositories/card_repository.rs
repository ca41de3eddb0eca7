// src/repositories/card_repository.rs
//
// Card persistence over a snapshot-backed entity container

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Card, EntityId};
use crate::error::AppResult;
use crate::repositories::entity_container::EntityContainer;

pub trait CardRepository: Send + Sync {
    fn next_id(&self) -> EntityId;
    fn add(&self, card: Card) -> EntityId;
    fn get_by_id(&self, id: EntityId) -> Option<Card>;
    fn delete_by_id(&self, id: EntityId) -> bool;
    fn update(&self, id: EntityId, card: Card) -> AppResult<()>;
    fn update_many(&self, cards: Vec<Card>) -> AppResult<usize>;
    fn list_all(&self) -> Vec<Card>;
    fn len(&self) -> usize;
}

pub struct FileCardRepository {
    container: RwLock<EntityContainer<Card>>,
}

impl FileCardRepository {
    /// Load cards from `path`; a missing file starts an empty collection
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        Ok(Self {
            container: RwLock::new(EntityContainer::open(path)?),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityContainer<Card>> {
        self.container.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityContainer<Card>> {
        self.container.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CardRepository for FileCardRepository {
    fn next_id(&self) -> EntityId {
        self.read().next_id()
    }

    fn add(&self, card: Card) -> EntityId {
        self.write().add(card)
    }

    fn get_by_id(&self, id: EntityId) -> Option<Card> {
        self.read().get_by_key(&id)
    }

    fn delete_by_id(&self, id: EntityId) -> bool {
        self.write().delete_by_key(&id)
    }

    fn update(&self, id: EntityId, mut card: Card) -> AppResult<()> {
        card.id = id;
        self.write().update(&id, card)
    }

    fn update_many(&self, cards: Vec<Card>) -> AppResult<usize> {
        self.write().update_many(cards)
    }

    fn list_all(&self) -> Vec<Card> {
        self.read().snapshot()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
