// src/integrations/mod.rs
//
// External Integrations Module

pub mod card_image_source;
pub mod mtgio;
pub mod set_source;

pub use card_image_source::CardImageSource;
pub use mtgio::MtgApiClient;
pub use set_source::{SetSource, SourceSet};

#[cfg(test)]
pub use card_image_source::MockCardImageSource;
#[cfg(test)]
pub use set_source::MockSetSource;
