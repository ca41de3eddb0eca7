// src/infrastructure/image_store.rs
//
// Card Image Storage
//
// CRITICAL RULES:
// - All images live flat inside one configured directory
// - File names derive from owner id, sanitized names, slot and extension
// - Uploading for a slot replaces the previous file of that slot
// - Source files chosen by the user are copied, never moved

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::domain::{EntityId, ImageSlot};
use crate::error::{AppError, AppResult};

/// Copies, names and deletes card image files
///
/// INVARIANTS:
/// - Two uploads for the same card and slot resolve to the same name
///   unless the extension differs, in which case the older file is removed
/// - Stored references are bare file names relative to `root`
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<ownerId>+<setName>+<cardName>+<slot>.<ext>`
    pub fn file_name_for(
        owner_id: EntityId,
        set_name: &str,
        card_name: &str,
        slot: ImageSlot,
        extension: &str,
    ) -> String {
        let mut name = format!(
            "{}+{}+{}+{}",
            owner_id,
            sanitize(set_name),
            sanitize(card_name),
            slot
        );
        if !extension.is_empty() {
            name.push('.');
            name.push_str(extension);
        }
        name
    }

    /// Absolute location of a stored reference
    pub fn resolve(&self, file_ref: &str) -> PathBuf {
        self.root.join(file_ref)
    }

    pub fn exists(&self, file_ref: &str) -> bool {
        self.resolve(file_ref).is_file()
    }

    /// Copy `source` into the image directory under the derived name
    ///
    /// `previous` is the reference currently held for this slot. It is
    /// deleted after a successful copy when it differs from the new name.
    /// On error, `previous` is left untouched.
    pub fn store(
        &self,
        owner_id: EntityId,
        owner_name: &str,
        set_name: &str,
        slot: ImageSlot,
        source: &Path,
        previous: Option<&str>,
    ) -> AppResult<String> {
        if !source.is_file() {
            return Err(AppError::Other(format!(
                "Image source file not found: {:?}",
                source
            )));
        }

        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = Self::file_name_for(owner_id, set_name, owner_name, slot, &extension);

        fs::create_dir_all(&self.root)?;
        let destination = self.resolve(&file_name);

        // Copying a file onto itself would truncate it
        if destination.is_file() && fs::canonicalize(source)? == fs::canonicalize(&destination)? {
            debug!("Image {:?} is already stored as {}", source, file_name);
            return Ok(file_name);
        }

        debug!("Copy file from {:?} to {:?}", source, destination);
        fs::copy(source, &destination)?;

        // The old file goes only once the new one is in place
        if let Some(old) = previous {
            if old != file_name {
                debug!("Delete old {} file {} of card {}", slot, old, owner_id);
                if let Err(e) = self.delete(old) {
                    warn!("Could not delete replaced image {}: {}", old, e);
                }
            }
        }

        Ok(file_name)
    }

    /// Delete a stored image; `Ok(false)` when it was already gone
    pub fn delete(&self, file_ref: &str) -> AppResult<bool> {
        let path = self.resolve(file_ref);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Image file {:?} deleted", path);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Image file {:?} already gone", path);
                Ok(false)
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Strip characters that are awkward in file names
fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\'' | '`' | ',' | ' '))
        .collect()
}
