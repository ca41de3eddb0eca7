// src/services/card_service.rs
//
// Card Service - Card Collection Management
//
// CRITICAL RULES:
// - The repository assigns ids, callers never pick them
// - Deleting a card removes its image files first
// - A failed image delete never blocks the card delete
// - Cards keep an embedded copy of their set; set edits are pushed here
// - A stored image reference always names an existing file

use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::domain::{validate_card, Card, CardSet, DomainError, EntityId, ImageSlot};
use crate::error::{AppError, AppResult};
use crate::events::{CardAdded, CardDeleted, CardUpdated, CardsReassigned, EventBus};
use crate::infrastructure::ImageStore;
use crate::integrations::CardImageSource;
use crate::repositories::CardRepository;

pub struct CardService {
    card_repo: Arc<dyn CardRepository>,
    images: Arc<ImageStore>,
    event_bus: Arc<EventBus>,
}

impl CardService {
    pub fn new(
        card_repo: Arc<dyn CardRepository>,
        images: Arc<ImageStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            card_repo,
            images,
            event_bus,
        }
    }

    /// Id the next added card will receive
    ///
    /// Used to name image files of a card that is still being edited.
    pub fn reserve_id(&self) -> EntityId {
        self.card_repo.next_id()
    }

    /// Add a new card; any id on `card` is replaced
    pub fn add_card(&self, card: Card) -> AppResult<EntityId> {
        // 1. Validate domain invariants
        validate_card(&card)?;
        self.ensure_images_exist(&card)?;

        // 2. Persist (assigns the id)
        let name = card.name.clone();
        let id = self.card_repo.add(card);
        info!("Card {} added: {}", id, name);

        // 3. Emit event
        self.event_bus.emit(CardAdded::new(id, name));

        Ok(id)
    }

    pub fn get_card(&self, id: EntityId) -> Option<Card> {
        self.card_repo.get_by_id(id)
    }

    /// All cards in insertion order
    pub fn list_cards(&self) -> Vec<Card> {
        self.card_repo.list_all()
    }

    /// All cards ordered by name, ties by id
    pub fn list_cards_sorted_by_name(&self) -> Vec<Card> {
        let mut cards = self.card_repo.list_all();
        cards.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        cards
    }

    /// Cards whose name, set or note contains `query`, ignoring case
    ///
    /// An empty query matches every card. Results are ordered by name.
    pub fn search_cards(&self, query: &str) -> Vec<Card> {
        let needle = query.trim().to_lowercase();
        let cards = self.list_cards_sorted_by_name();
        if needle.is_empty() {
            return cards;
        }

        cards
            .into_iter()
            .filter(|card| {
                [
                    card.name.as_str(),
                    card.set_name(),
                    card.set_code().unwrap_or(""),
                    card.note.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Replace the stored card `id` with `card`
    pub fn update_card(&self, id: EntityId, card: Card) -> AppResult<()> {
        validate_card(&card)?;
        self.ensure_images_exist(&card)?;

        self.card_repo.update(id, card)?;
        info!("Card {} updated", id);

        self.event_bus.emit(CardUpdated::new(id));

        Ok(())
    }

    /// Delete a card together with its image files
    ///
    /// Returns `Ok(false)` when no card with `id` exists. Image files that
    /// cannot be removed are logged and reported in the `CardDeleted` event.
    pub fn delete_card(&self, id: EntityId) -> AppResult<bool> {
        // 1. Load
        let card = match self.card_repo.get_by_id(id) {
            Some(card) => card,
            None => return Ok(false),
        };

        // 2. Cascade to images
        let mut orphaned = Vec::new();
        for file_ref in card.images() {
            if let Err(e) = self.images.delete(file_ref) {
                warn!("Could not delete image {} of card {}: {}", file_ref, id, e);
                orphaned.push(file_ref.to_string());
            }
        }

        // 3. Remove the card itself
        if !self.card_repo.delete_by_id(id) {
            return Ok(false);
        }
        info!("Card {} deleted: {}", id, card.name);

        // 4. Emit event
        self.event_bus.emit(CardDeleted::new(id, orphaned));

        Ok(true)
    }

    /// Store an image for a card that has not been added yet
    ///
    /// `owner_id` is usually the value of `reserve_id`. The draft's slot is
    /// updated with the stored file name; the previous file is replaced.
    pub fn attach_image(
        &self,
        draft: &mut Card,
        owner_id: EntityId,
        slot: ImageSlot,
        source: &Path,
    ) -> AppResult<String> {
        let file_name = self.images.store(
            owner_id,
            &draft.name,
            draft.set_name(),
            slot,
            source,
            draft.image(slot),
        )?;
        draft.set_image(slot, Some(file_name.clone()));
        Ok(file_name)
    }

    /// Store a new image for a persisted card and save the new reference
    pub fn replace_card_image(
        &self,
        id: EntityId,
        slot: ImageSlot,
        source: &Path,
    ) -> AppResult<String> {
        let mut card = self.card_repo.get_by_id(id).ok_or(AppError::NotFound)?;

        let file_name = self.attach_image(&mut card, id, slot, source)?;
        self.card_repo.update(id, card)?;

        self.event_bus.emit(CardUpdated::new(id));

        Ok(file_name)
    }

    /// Official image URL for a stored card, looked up by name and set
    ///
    /// Cards without a set have no printing to look up and yield `None`.
    pub async fn preview_image_url(
        &self,
        id: EntityId,
        source: &dyn CardImageSource,
    ) -> AppResult<Option<String>> {
        let card = self.card_repo.get_by_id(id).ok_or(AppError::NotFound)?;

        match card.set_code() {
            Some(code) => source.card_image_url(&card.name, code).await,
            None => {
                debug!("Card {} has no set, no preview available", id);
                Ok(None)
            }
        }
    }

    /// Point every card of set `previous_code` at `set`
    ///
    /// All affected cards are written with a single save.
    pub fn reassign_set(&self, previous_code: &str, set: &CardSet) -> AppResult<usize> {
        let affected: Vec<Card> = self
            .card_repo
            .list_all()
            .into_iter()
            .filter(|card| card.set_code() == Some(previous_code))
            .map(|mut card| {
                card.set = Some(set.clone());
                card
            })
            .collect();

        if affected.is_empty() {
            return Ok(0);
        }

        let count = self.card_repo.update_many(affected)?;
        info!(
            "{} cards moved from set {} to {} ({})",
            count, previous_code, set.code, set.name
        );

        self.event_bus
            .emit(CardsReassigned::new(set.code.clone(), count));

        Ok(count)
    }

    fn ensure_images_exist(&self, card: &Card) -> AppResult<()> {
        for file_ref in card.images() {
            if !self.images.exists(file_ref) {
                return Err(DomainError::InvariantViolation(format!(
                    "Image {} does not exist in the image directory",
                    file_ref
                ))
                .into());
            }
        }
        Ok(())
    }
}
