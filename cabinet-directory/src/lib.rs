//! Minister directory: view models, in-memory search and paging, and the
//! [`DirectoryContext`] that ties the REST client to the biography
//! normalizer.

pub mod config;
pub mod context;
pub mod error;
pub mod memo;
pub mod minister;
pub mod page;
pub mod search;

pub use config::DirectoryConfig;
pub use context::DirectoryContext;
pub use error::DirectoryError;
pub use memo::Memo;
pub use minister::{normalize_ministers, Minister};
pub use page::{Page, Pageable};
pub use search::{search, DirectoryQuery, SortKey};
