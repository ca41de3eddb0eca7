// src/repositories/entity_container.rs
//
// Generic in-memory entity container backed by a snapshot file
//
// CRITICAL RULES:
// - One ordered collection per entity type
// - The container assigns identifiers, callers never do
// - Every mutation is followed by a full-collection save
// - Save failures are logged; the in-memory collection stays authoritative
// - Lookups hand out copies, never references into the collection

use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::domain::{AllocatedId, Entity, EntityId};
use crate::error::{AppError, AppResult};
use crate::storage::{CollectionCodec, LoadOutcome};

/// Where the initial contents of a container came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerOrigin {
    /// Loaded from an existing snapshot file
    Disk,
    /// No snapshot existed (or it was reset); started empty
    Fresh,
}

pub struct EntityContainer<E: Entity> {
    items: Vec<E>,
    path: PathBuf,
    codec: CollectionCodec,
    origin: ContainerOrigin,
}

impl<E: Entity> EntityContainer<E> {
    /// Load the container from `path`
    ///
    /// A missing file yields an empty `Fresh` container. A corrupt file is
    /// returned as an error and must stop the caller.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let codec = CollectionCodec::new();

        debug!("Try to load {} data at {:?}", E::KIND, path);
        let (items, origin) = match codec.load::<E>(&path) {
            Ok(LoadOutcome::Loaded(items)) => (items, ContainerOrigin::Disk),
            Ok(LoadOutcome::Missing) => {
                warn!("No serialized {} data found at {:?}", E::KIND, path);
                info!("Plain {} container created", E::KIND);
                (Vec::new(), ContainerOrigin::Fresh)
            }
            Err(e) => {
                error!("FATAL: cannot load {} data: {}", E::KIND, e);
                return Err(e);
            }
        };

        Ok(Self {
            items,
            path,
            codec,
            origin,
        })
    }

    pub fn origin(&self) -> ContainerOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the entity with `key`, if any
    pub fn get_by_key(&self, key: &E::Key) -> Option<E> {
        match self.position(key) {
            Some(idx) => Some(self.items[idx].clone()),
            None => {
                warn!("No {} with key={} found", E::KIND, key);
                None
            }
        }
    }

    /// Remove the entity with `key`; an unknown key is a no-op
    pub fn delete_by_key(&mut self, key: &E::Key) -> bool {
        match self.position(key) {
            Some(idx) => {
                let removed = self.items.remove(idx);
                debug!("{} deleted: {:?}", E::KIND, removed);
                self.persist();
                true
            }
            None => {
                debug!("No {} with key={} found, nothing deleted", E::KIND, key);
                false
            }
        }
    }

    /// Replace the entity stored under `key` with `value`
    ///
    /// `value` may carry a new key as long as no other entity holds it.
    pub fn update(&mut self, key: &E::Key, value: E) -> AppResult<()> {
        let idx = self.position(key).ok_or(AppError::NotFound)?;

        let new_key = value.key();
        if new_key != *key && self.position(&new_key).is_some() {
            return Err(AppError::DuplicateKey(format!("{} {}", E::KIND, new_key)));
        }

        self.items[idx] = value;
        self.persist();
        debug!("{} with key={} updated", E::KIND, key);
        Ok(())
    }

    /// Replace several entities by key with a single save
    ///
    /// Nothing is replaced unless every key is present.
    pub fn update_many(&mut self, values: Vec<E>) -> AppResult<usize> {
        let mut slots = Vec::with_capacity(values.len());
        for value in &values {
            let idx = self.position(&value.key()).ok_or(AppError::NotFound)?;
            slots.push(idx);
        }

        let count = values.len();
        for (idx, value) in slots.into_iter().zip(values) {
            self.items[idx] = value;
        }

        if count > 0 {
            self.persist();
        }
        Ok(count)
    }

    /// Replace the whole collection and persist it
    pub fn replace_all(&mut self, items: Vec<E>) -> AppResult<()> {
        for (i, item) in items.iter().enumerate() {
            let key = item.key();
            if items[..i].iter().any(|other| other.key() == key) {
                return Err(AppError::DuplicateKey(format!("{} {}", E::KIND, key)));
            }
        }

        self.items = items;
        self.persist();
        Ok(())
    }

    /// Delete the backing file and forget every entity
    pub fn reset(&mut self) -> AppResult<()> {
        self.codec.delete_file(&self.path)?;
        self.items.clear();
        self.origin = ContainerOrigin::Fresh;
        info!("{} container reset", E::KIND);
        Ok(())
    }

    /// Copy of the collection in insertion order
    pub fn snapshot(&self) -> Vec<E> {
        self.items.clone()
    }

    /// Copy of the collection in natural order
    pub fn sorted_snapshot(&self) -> Vec<E> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| a.natural_cmp(b));
        items
    }

    /// Last entity in natural order
    pub fn last_in_order(&self) -> Option<E> {
        self.items
            .iter()
            .max_by(|a, b| a.natural_cmp(b))
            .cloned()
    }

    /// Write the whole collection to the backing file
    pub fn save(&self) -> AppResult<()> {
        self.codec.save(&self.items, &self.path)?;
        info!("{} data stored to file {:?}", E::KIND, self.path);
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            error!(
                "Failed to save {} container to {:?}: {}",
                E::KIND,
                self.path,
                e
            );
        }
    }

    fn position(&self, key: &E::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }
}

impl<E: AllocatedId> EntityContainer<E> {
    /// Identifier the next `add` will assign
    ///
    /// 1 for an empty container, otherwise the identifier of the last entity
    /// in natural order plus one.
    pub fn next_id(&self) -> EntityId {
        self.items
            .iter()
            .max_by(|a, b| a.natural_cmp(b))
            .map(|last| last.key() + 1)
            .unwrap_or(1)
    }

    /// Assign the next free identifier, append and persist
    ///
    /// Any identifier already set on `entity` is overwritten.
    pub fn add(&mut self, mut entity: E) -> EntityId {
        let id = self.next_id();
        entity.set_id(id);
        self.items.push(entity);
        self.persist();
        debug!("{} added with id={}", E::KIND, id);
        id
    }
}
