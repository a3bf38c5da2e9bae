pub mod error;
pub mod search;
pub mod status;

pub use error::ApiError;
pub use search::search;
pub use status::provider_status;
