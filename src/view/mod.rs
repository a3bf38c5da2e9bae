pub mod backend;
pub mod page;
pub mod search_view;

pub use backend::{HttpSearchBackend, ProxyBackend, SearchBackend, SearchError};
pub use page::PageTemplate;
pub use search_view::{Grid, SearchTicket, SearchView, ViewStatus};
