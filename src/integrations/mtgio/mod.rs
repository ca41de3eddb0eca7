pub mod client;

pub use client::{MtgApiClient, DEFAULT_BASE_URL};
