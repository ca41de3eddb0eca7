// src/integrations/card_image_source.rs
//
// Read-only lookup of official card images

use async_trait::async_trait;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardImageSource: Send + Sync {
    /// URL of an official image of card `name` printed in set `set_code`
    async fn card_image_url(&self, name: &str, set_code: &str) -> AppResult<Option<String>>;
}
