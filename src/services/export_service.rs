// src/services/export_service.rs
//
// Export Service - Collection Export
//
// CRITICAL RULES:
// - Read-only: works on a snapshot, never mutates the collection
// - Output files are overwritten

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde_json::{json, Map, Value};

use crate::domain::{Card, ImageSlot};
use crate::error::AppResult;
use crate::repositories::CardRepository;

const CSV_HEADER: [&str; 12] = [
    "Id",
    "Name",
    "Set",
    "Language",
    "Condition",
    "Amount",
    "Foil",
    "Signed",
    "Altered",
    "Note",
    "Front Image",
    "Back Image",
];

pub struct ExportService {
    card_repo: Arc<dyn CardRepository>,
}

impl ExportService {
    pub fn new(card_repo: Arc<dyn CardRepository>) -> Self {
        Self { card_repo }
    }

    /// Write all cards as one JSON object keyed by card id
    pub fn export_json(&self, path: &Path) -> AppResult<usize> {
        let cards = self.card_repo.list_all();

        let mut root = Map::new();
        for card in &cards {
            root.insert(card.id.to_string(), card_to_json(card));
        }

        ensure_parent(path)?;
        fs::write(path, serde_json::to_string_pretty(&Value::Object(root))?)?;
        info!("{} cards exported to {:?}", cards.len(), path);

        Ok(cards.len())
    }

    /// Write all cards as a comma separated table with a header row
    pub fn export_csv(&self, path: &Path) -> AppResult<usize> {
        let cards = self.card_repo.list_all();

        ensure_parent(path)?;
        let mut writer = csv::Writer::from_path(path).map_err(io::Error::from)?;
        writer.write_record(CSV_HEADER).map_err(io::Error::from)?;
        for card in &cards {
            writer
                .write_record([
                    card.id.to_string(),
                    card.name.clone(),
                    card.set_name().to_string(),
                    card.language.to_string(),
                    card.condition.to_string(),
                    card.amount.to_string(),
                    card.foil.to_string(),
                    card.signed.to_string(),
                    card.altered.to_string(),
                    card.note.clone(),
                    card.image(ImageSlot::Front).unwrap_or("").to_string(),
                    card.image(ImageSlot::Back).unwrap_or("").to_string(),
                ])
                .map_err(io::Error::from)?;
        }
        writer.flush()?;
        info!("{} cards exported to {:?}", cards.len(), path);

        Ok(cards.len())
    }
}

fn card_to_json(card: &Card) -> Value {
    let set = card.set.as_ref().map(|set| {
        json!({
            "id": set.code,
            "name": set.name,
            "releaseDate": set
                .release_date
                .map(|d| d.format("%Y/%m/%d").to_string())
                .unwrap_or_default(),
        })
    });

    json!({
        "id": card.id,
        "amount": card.amount,
        "name": card.name,
        "set": set,
        "note": card.note,
        "images": card.images(),
        "language": card.language.to_string(),
        "condition": card.condition.to_string().replace(' ', ""),
        "foil": card.foil,
        "signed": card.signed,
        "altered": card.altered,
    })
}

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
