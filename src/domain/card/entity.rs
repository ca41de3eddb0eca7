use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::entity::{AllocatedId, Entity, EntityId, UNASSIGNED_ID};
use crate::domain::set::CardSet;

/// A single card position in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Assigned by the card container, `UNASSIGNED_ID` until added
    pub id: EntityId,

    pub name: String,

    /// Copy of the owning set at the time it was assigned
    pub set: Option<CardSet>,

    pub language: Language,

    pub condition: Condition,

    /// Number of physical copies
    pub amount: u32,

    pub foil: bool,
    pub signed: bool,
    pub altered: bool,

    pub note: String,

    /// File name inside the configured image directory
    pub image_front: Option<String>,

    /// File name inside the configured image directory
    pub image_back: Option<String>,
}

/// Printed language of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    German,
    Spanish,
    Italian,
    Chinese,
    Japanese,
    Russian,
}

/// Physical condition grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Condition {
    Mint,
    #[default]
    NearMint,
    Excellent,
    Good,
    LightPlayed,
    Played,
    Poor,
}

/// Which side of the card an image shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSlot {
    Front,
    Back,
}

impl Card {
    /// Create a card that has not been added to a container yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            set: None,
            language: Language::default(),
            condition: Condition::default(),
            amount: 1,
            foil: false,
            signed: false,
            altered: false,
            note: String::new(),
            image_front: None,
            image_back: None,
        }
    }

    pub fn with_set(mut self, set: CardSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Name of the owning set, empty when none is assigned
    pub fn set_name(&self) -> &str {
        self.set.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    pub fn set_code(&self) -> Option<&str> {
        self.set.as_ref().map(|s| s.code.as_str())
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::Front => self.image_front.as_deref(),
            ImageSlot::Back => self.image_back.as_deref(),
        }
    }

    pub fn set_image(&mut self, slot: ImageSlot, file_name: Option<String>) {
        match slot {
            ImageSlot::Front => self.image_front = file_name,
            ImageSlot::Back => self.image_back = file_name,
        }
    }

    /// Image references currently held, front first
    pub fn images(&self) -> Vec<&str> {
        [ImageSlot::Front, ImageSlot::Back]
            .into_iter()
            .filter_map(|slot| self.image(slot))
            .collect()
    }
}

impl Entity for Card {
    type Key = EntityId;

    const KIND: &'static str = "card";

    fn key(&self) -> EntityId {
        self.id
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl AllocatedId for Card {
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Set: {}, Language: {}, Condition: {}, Amount: {}",
            self.id,
            self.name,
            self.set_name(),
            self.language,
            self.condition,
            self.amount
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::English => "English",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Russian => "Russian",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Condition::Mint => "Mint",
            Condition::NearMint => "Near Mint",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::LightPlayed => "Light Played",
            Condition::Played => "Played",
            Condition::Poor => "Poor",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSlot::Front => write!(f, "IMG_FRONT"),
            ImageSlot::Back => write!(f, "IMG_BACK"),
        }
    }
}
