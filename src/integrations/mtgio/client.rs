// src/integrations/mtgio/client.rs
//
// magicthegathering.io REST client
//
// ARCHITECTURE:
// - JSON over HTTPS, read-only
// - Maps external payloads → SourceSet DTOs (NO domain mutation)
// - Used by SetService through the SetSource trait and by
//   CardService through the CardImageSource trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies stored entities directly
// - All transport and payload failures surface as AppError::External

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};
use crate::integrations::card_image_source::CardImageSource;
use crate::integrations::set_source::{SetSource, SourceSet};

pub const DEFAULT_BASE_URL: &str = "https://api.magicthegathering.io/v1";

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// `/sets` response wrapper
#[derive(Debug, Deserialize)]
struct SetsResponse {
    sets: Vec<SetData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetData {
    code: String,
    name: String,
    release_date: Option<String>,
    #[serde(default)]
    online_only: bool,
}

/// `/cards` response wrapper
#[derive(Debug, Deserialize)]
struct CardsResponse {
    cards: Vec<CardData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardData {
    image_url: Option<String>,
}

/// Rate limiter state
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    /// Reserve the next request slot and return how long to wait for it
    fn reserve(&mut self) -> Duration {
        let now = Instant::now();
        let wait = match self.last_request {
            Some(last) => self.min_interval.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        };
        self.last_request = Some(now + wait);
        wait
    }
}

/// magicthegathering.io API client
pub struct MtgApiClient {
    base_url: String,
    http_client: Client,
    rate_limiter: Mutex<RateLimiter>,
}

impl MtgApiClient {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::External(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            rate_limiter: Mutex::new(RateLimiter::new(Duration::from_millis(200))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let wait = self
            .rate_limiter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reserve();
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::External(format!("MTG API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::External(format!(
                "MTG API returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::External(format!("Failed to parse MTG API response: {}", e)))
    }

    fn map_set(data: SetData) -> SourceSet {
        let release_date = data.release_date.as_deref().and_then(|raw| {
            match NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Unable to parse release date of set {}: {}", data.name, e);
                    None
                }
            }
        });

        SourceSet {
            name: data.name,
            code: data.code,
            release_date,
            online_only: data.online_only,
        }
    }
}

#[async_trait]
impl SetSource for MtgApiClient {
    async fn fetch_sets(&self) -> AppResult<Vec<SourceSet>> {
        let response: SetsResponse = self.get_json("sets", &[]).await?;
        debug!("MTG API reported {} sets", response.sets.len());
        Ok(response.sets.into_iter().map(Self::map_set).collect())
    }
}

#[async_trait]
impl CardImageSource for MtgApiClient {
    async fn card_image_url(&self, name: &str, set_code: &str) -> AppResult<Option<String>> {
        let response: CardsResponse = self
            .get_json("cards", &[("name", name), ("set", set_code)])
            .await?;

        let url = response.cards.into_iter().find_map(|card| card.image_url);
        if url.is_none() {
            warn!("No image for card '{}' of set {} found", name, set_code);
        }
        Ok(url)
    }
}
