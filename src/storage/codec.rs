// src/storage/codec.rs
//
// Collection snapshot codec
//
// PRINCIPLES:
// - Every save rewrites the entire collection
// - A missing file is "no data yet", never an error
// - A present but unreadable file is corrupt, never "empty"
// - No write-ahead log, no atomic rename

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};

use crate::domain::Entity;
use crate::error::{AppError, AppResult};

/// Version of the snapshot envelope written by `save`
pub const FORMAT_VERSION: u32 = 1;

/// Result of reading a snapshot file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<E> {
    Loaded(Vec<E>),
    Missing,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, E> {
    format_version: u32,
    kind: &'a str,
    items: &'a [E],
}

#[derive(Deserialize)]
struct Envelope<E> {
    format_version: u32,
    kind: String,
    items: Vec<E>,
}

/// Reads and writes whole collections as a single JSON envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionCodec;

impl CollectionCodec {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `items` to `path`, overwriting any previous snapshot
    pub fn save<E: Entity>(&self, items: &[E], path: &Path) -> AppResult<()> {
        let envelope = EnvelopeRef {
            format_version: FORMAT_VERSION,
            kind: E::KIND,
            items,
        };
        let bytes = serde_json::to_vec_pretty(&envelope)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, bytes)?;
        debug!("Stored {} {} entries to {:?}", items.len(), E::KIND, path);
        Ok(())
    }

    /// Read a snapshot written by `save`
    pub fn load<E: Entity>(&self, path: &Path) -> AppResult<LoadOutcome<E>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} data at {:?}", E::KIND, path);
                return Ok(LoadOutcome::Missing);
            }
            Err(e) => return Err(corrupt(path, format!("unreadable: {}", e))),
        };

        let envelope: Envelope<E> =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(path, e.to_string()))?;

        if envelope.kind != E::KIND {
            return Err(corrupt(
                path,
                format!("holds '{}' entries, expected '{}'", envelope.kind, E::KIND),
            ));
        }
        if envelope.format_version != FORMAT_VERSION {
            return Err(corrupt(
                path,
                format!(
                    "unsupported format version {} (expected {})",
                    envelope.format_version, FORMAT_VERSION
                ),
            ));
        }

        debug!(
            "Loaded {} {} entries from {:?}",
            envelope.items.len(),
            E::KIND,
            path
        );
        Ok(LoadOutcome::Loaded(envelope.items))
    }

    /// Remove the snapshot file; a file that is already gone only warns
    pub fn delete_file(&self, path: &Path) -> AppResult<()> {
        debug!("Try to delete snapshot file at {:?}", path);
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Snapshot file at {:?} has been deleted", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No snapshot file to delete at {:?}", path);
                Ok(())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

fn corrupt(path: &Path, reason: String) -> AppError {
    AppError::CorruptCollection {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardSet, Condition, ImageSlot, Language};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_cards() -> Vec<Card> {
        let alpha = CardSet::new(
            "Limited Edition Alpha",
            "LEA",
            NaiveDate::from_ymd_opt(1993, 8, 5),
        );

        let mut lotus = Card::new("Black Lotus").with_set(alpha.clone());
        lotus.id = 1;
        lotus.condition = Condition::Played;
        lotus.set_image(ImageSlot::Front, Some("1+LimitedEditionAlpha+BlackLotus+IMG_FRONT.jpg".into()));

        let mut angel = Card::new("Serra Angel").with_set(alpha);
        angel.id = 2;
        angel.language = Language::German;
        angel.foil = true;
        angel.note = "trade binder".to_string();

        vec![lotus, angel]
    }

    #[test]
    fn test_round_trip_keeps_nested_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carddata");
        let codec = CollectionCodec::new();
        let cards = sample_cards();

        codec.save(&cards, &path).unwrap();

        match codec.load::<Card>(&path).unwrap() {
            LoadOutcome::Loaded(loaded) => assert_eq!(loaded, cards),
            LoadOutcome::Missing => panic!("snapshot should exist"),
        }
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let outcome = CollectionCodec::new()
            .load::<Card>(&dir.path().join("nothing-here"))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn test_truncated_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carddata");
        let codec = CollectionCodec::new();
        codec.save(&sample_cards(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let err = codec.load::<Card>(&path).unwrap_err();
        assert!(matches!(err, AppError::CorruptCollection { .. }));
    }

    #[test]
    fn test_empty_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carddata");
        fs::write(&path, b"").unwrap();

        let err = CollectionCodec::new().load::<Card>(&path).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_wrong_kind_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setdata");
        let codec = CollectionCodec::new();
        codec
            .save(&[CardSet::new("Limited Edition Alpha", "LEA", None)], &path)
            .unwrap();

        let err = codec.load::<Card>(&path).unwrap_err();
        assert!(matches!(err, AppError::CorruptCollection { .. }));
    }

    #[test]
    fn test_unknown_version_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carddata");
        fs::write(&path, r#"{"format_version":99,"kind":"card","items":[]}"#).unwrap();

        let err = CollectionCodec::new().load::<Card>(&path).unwrap_err();
        assert!(matches!(err, AppError::CorruptCollection { .. }));
    }

    #[test]
    fn test_delete_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setdata");
        let codec = CollectionCodec::new();
        codec.save::<CardSet>(&[], &path).unwrap();
        assert!(path.exists());

        codec.delete_file(&path).unwrap();
        assert!(!path.exists());

        // Deleting again is tolerated
        codec.delete_file(&path).unwrap();
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("carddata");
        CollectionCodec::new().save(&sample_cards(), &path).unwrap();
        assert!(path.exists());
    }
}
