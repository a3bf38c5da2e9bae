pub mod cookie;
pub mod handlers;

pub use handlers::*;
