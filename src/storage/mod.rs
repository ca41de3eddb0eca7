// src/storage/mod.rs
//
// Whole-collection persistence
//
// Provides:
// - One snapshot file per entity type
// - Distinct "missing" vs "corrupt" load outcomes

pub mod codec;

pub use codec::{CollectionCodec, LoadOutcome, FORMAT_VERSION};
