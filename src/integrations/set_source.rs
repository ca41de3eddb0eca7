// src/integrations/set_source.rs
//
// Read-only reference source for card sets

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::CardSet;
use crate::error::AppResult;

/// A set as reported by the external source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub name: String,
    pub code: String,
    pub release_date: Option<NaiveDate>,
    /// Digital-only releases have no place in a physical collection
    pub online_only: bool,
}

impl SourceSet {
    pub fn to_card_set(&self) -> CardSet {
        CardSet::new(self.name.clone(), self.code.clone(), self.release_date)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SetSource: Send + Sync {
    /// Every set the source knows about, in whatever order it reports them
    async fn fetch_sets(&self) -> AppResult<Vec<SourceSet>>;
}
