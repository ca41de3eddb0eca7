// src/services/set_service.rs
//
// Set Service - Reference Set Catalogue
//
// CRITICAL RULES:
// - The local set list is a cache of the external source
// - An absent set file triggers a full bootstrap from the source
// - Refresh compares only the latest set; any difference rebuilds everything
// - The source is queried before local data is touched
// - Online-only releases are never stored

use std::collections::HashSet;
use std::sync::Arc;

use log::{info, warn};

use crate::domain::{validate_set, CardSet, Entity};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SetCollectionRebuilt, SetUpdated};
use crate::integrations::{SetSource, SourceSet};
use crate::repositories::SetRepository;

/// Result of comparing the local sets with the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Latest local set matches the source; nothing was written
    UpToDate { latest: CardSet },
    /// Local sets were discarded and rebuilt from the source
    Replaced { latest: CardSet, count: usize },
}

impl RefreshOutcome {
    pub fn latest(&self) -> &CardSet {
        match self {
            RefreshOutcome::UpToDate { latest } => latest,
            RefreshOutcome::Replaced { latest, .. } => latest,
        }
    }

    pub fn was_replaced(&self) -> bool {
        matches!(self, RefreshOutcome::Replaced { .. })
    }
}

pub struct SetService {
    set_repo: Arc<dyn SetRepository>,
    source: Arc<dyn SetSource>,
    event_bus: Arc<EventBus>,
}

impl SetService {
    pub fn new(
        set_repo: Arc<dyn SetRepository>,
        source: Arc<dyn SetSource>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            set_repo,
            source,
            event_bus,
        }
    }

    /// Cold start
    ///
    /// A loaded set file is used as is. Without one, the whole catalogue is
    /// fetched from the source; failing to do so is an error the caller
    /// should treat as fatal.
    pub async fn initialize(&self) -> AppResult<()> {
        if !self.set_repo.needs_bootstrap() {
            info!("{} sets loaded", self.set_repo.len());
            return Ok(());
        }

        info!("No set data found, fetching sets from source");
        let sets = self.fetch_physical_sets().await?;
        if sets.is_empty() {
            return Err(no_sets_error());
        }
        self.rebuild(sets)?;
        Ok(())
    }

    /// Bring the local sets in line with the source
    ///
    /// Only the latest set is compared. When it differs, the local
    /// collection is reset and rebuilt from the fetched list.
    pub async fn update_from_source(&self) -> AppResult<RefreshOutcome> {
        // 1. Query the source first; failure leaves local data untouched
        let sets = self.fetch_physical_sets().await?;
        let source_latest = sets
            .last()
            .cloned()
            .ok_or_else(no_sets_error)?;

        // 2. Compare latest codes
        if let Some(local_latest) = self.set_repo.latest() {
            if local_latest.code == source_latest.code {
                info!("Sets are up to date, latest is {}", local_latest);
                return Ok(RefreshOutcome::UpToDate {
                    latest: local_latest,
                });
            }
            info!(
                "Latest local set {} differs from source {}, rebuilding",
                local_latest, source_latest
            );
        }

        // 3. Reset and rebuild
        self.set_repo.reset()?;
        let count = self.rebuild(sets)?;

        Ok(RefreshOutcome::Replaced {
            latest: source_latest,
            count,
        })
    }

    /// All sets in ascending release order
    pub fn list_sets(&self) -> Vec<CardSet> {
        self.set_repo.list_all()
    }

    pub fn get_set(&self, code: &str) -> Option<CardSet> {
        self.set_repo.get_by_code(code)
    }

    pub fn latest_set(&self) -> Option<CardSet> {
        self.set_repo.latest()
    }

    /// Replace the set stored under `code`
    ///
    /// Cards holding a copy of the old set are updated through the
    /// `SetUpdated` event.
    pub fn update_set(&self, code: &str, set: CardSet) -> AppResult<()> {
        validate_set(&set)?;

        self.set_repo.update(code, set.clone())?;
        info!("Set {} updated to {}", code, set);

        self.event_bus.emit(SetUpdated::new(code.to_string(), set));

        Ok(())
    }

    /// Fetch, drop online-only releases, sort ascending by release
    async fn fetch_physical_sets(&self) -> AppResult<Vec<CardSet>> {
        let fetched = self.source.fetch_sets().await?;
        let reported = fetched.len();

        let mut seen = HashSet::new();
        let mut sets: Vec<CardSet> = fetched
            .iter()
            .filter(|s| !s.online_only)
            .map(SourceSet::to_card_set)
            .filter(|s| match validate_set(s) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping set {:?} from source: {}", s.code, e);
                    false
                }
            })
            .filter(|s| {
                let fresh = seen.insert(s.code.clone());
                if !fresh {
                    warn!("Set source reported {} twice, keeping the first", s.code);
                }
                fresh
            })
            .collect();
        sets.sort_by(|a, b| a.natural_cmp(b));

        info!("Set source reported {} sets, {} kept", reported, sets.len());
        Ok(sets)
    }

    fn rebuild(&self, sets: Vec<CardSet>) -> AppResult<usize> {
        let count = sets.len();
        let latest_code = sets.last().map(|s| s.code.clone());

        self.set_repo.replace_all(sets)?;
        info!("Set collection rebuilt with {} sets", count);

        self.event_bus
            .emit(SetCollectionRebuilt::new(count, latest_code));

        Ok(count)
    }
}

fn no_sets_error() -> AppError {
    AppError::External("Set source returned no sets".to_string())
}
