// src/application/state.rs

use std::sync::Arc;

use log::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::events::{register_event_handlers, EventBus};
use crate::infrastructure::ImageStore;
use crate::integrations::{CardImageSource, MtgApiClient, SetSource};
use crate::repositories::{CardRepository, FileCardRepository, FileSetRepository, SetRepository};
use crate::services::{CardService, ExportService, SetService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub card_service: Arc<CardService>,
    pub set_service: Arc<SetService>,
    pub export_service: Arc<ExportService>,
    pub image_source: Arc<dyn CardImageSource>,
}

impl AppState {
    /// Open both collections and wire the services
    ///
    /// A corrupt collection file fails here; callers must not continue.
    /// Sets are not bootstrapped yet, see `SetService::initialize`.
    pub fn build(config: AppConfig) -> AppResult<Self> {
        let client = Arc::new(MtgApiClient::new(config.api_base_url.clone())?);
        Self::build_with_sources(config, client.clone(), client)
    }

    /// Same as `build`, with the online sources supplied by the caller
    pub fn build_with_sources(
        config: AppConfig,
        set_source: Arc<dyn SetSource>,
        image_source: Arc<dyn CardImageSource>,
    ) -> AppResult<Self> {
        // Repositories
        let card_repo: Arc<dyn CardRepository> =
            Arc::new(FileCardRepository::open(config.card_data_file.clone())?);
        let set_repo: Arc<dyn SetRepository> =
            Arc::new(FileSetRepository::open(config.set_data_file.clone())?);

        // Infrastructure
        let event_bus = Arc::new(EventBus::new());
        let images = Arc::new(ImageStore::new(config.image_dir.clone()));

        // Services
        let card_service = Arc::new(CardService::new(
            Arc::clone(&card_repo),
            images,
            Arc::clone(&event_bus),
        ));
        let set_service = Arc::new(SetService::new(set_repo, set_source, Arc::clone(&event_bus)));
        let export_service = Arc::new(ExportService::new(card_repo));

        register_event_handlers(&event_bus, Arc::clone(&card_service));

        info!("Application state ready, data in {:?}", config.data_dir);

        Ok(Self {
            config,
            event_bus,
            card_service,
            set_service,
            export_service,
            image_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardSet};
    use crate::error::AppError;
    use crate::events::SetUpdated;
    use crate::integrations::{MockCardImageSource, MockSetSource};
    use std::fs;
    use tempfile::tempdir;

    fn build(config: AppConfig) -> AppResult<AppState> {
        AppState::build_with_sources(
            config,
            Arc::new(MockSetSource::new()),
            Arc::new(MockCardImageSource::new()),
        )
    }

    #[test]
    fn test_corrupt_card_file_stops_startup() {
        let dir = tempdir().unwrap();
        let config = AppConfig::default().with_data_dir(dir.path());
        fs::write(&config.card_data_file, "{ not json").unwrap();

        let result = build(config);

        assert!(matches!(result, Err(AppError::CorruptCollection { .. })));
    }

    #[test]
    fn test_set_edits_reach_cards() {
        let dir = tempdir().unwrap();
        let config = AppConfig::default().with_data_dir(dir.path());
        let state = build(config).unwrap();

        let old = CardSet::new("Alpha", "LEA", None);
        let id = state
            .card_service
            .add_card(Card::new("Serra Angel").with_set(old))
            .unwrap();

        let new = CardSet::new("Limited Edition Alpha", "LEA", None);
        state.event_bus.emit(SetUpdated::new("LEA".to_string(), new.clone()));

        assert_eq!(state.card_service.get_card(id).unwrap().set, Some(new));
    }

    #[tokio::test]
    async fn test_preview_uses_configured_image_source() {
        let dir = tempdir().unwrap();
        let config = AppConfig::default().with_data_dir(dir.path());
        let mut images = MockCardImageSource::new();
        images
            .expect_card_image_url()
            .times(1)
            .returning(|_, _| Ok(Some("https://img.example/angel.jpg".to_string())));
        let state =
            AppState::build_with_sources(config, Arc::new(MockSetSource::new()), Arc::new(images))
                .unwrap();
        let id = state
            .card_service
            .add_card(Card::new("Serra Angel").with_set(CardSet::new("Alpha", "LEA", None)))
            .unwrap();

        let url = state
            .card_service
            .preview_image_url(id, state.image_source.as_ref())
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://img.example/angel.jpg"));
    }
}
