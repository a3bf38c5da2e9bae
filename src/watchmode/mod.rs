pub mod client;
pub mod types;

pub use client::{ProviderError, ProviderProbe, ProviderResult, WatchmodeClient};
pub use types::*;
