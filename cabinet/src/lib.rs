//! Cabinet: the data core behind a searchable directory of government
//! ministers.
//!
//! This facade crate re-exports the sub-crates through a single dependency
//! with feature flags. Import everything you need with:
//!
//! ```
//! use cabinet::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature     | Default | Crate               |
//! |-------------|---------|---------------------|
//! | `bio`       | **yes** | `cabinet-bio`       |
//! | `directory` | **yes** | `cabinet-directory` |
//!
//! `cabinet-core` (configuration, logging) and `cabinet-rest` (query shim)
//! are always included.

pub use cabinet_core;
pub use cabinet_rest;

pub use cabinet_core::{init_tracing, CabinetConfig, ConfigError, LogFormat};

#[cfg(feature = "bio")]
pub use cabinet_bio;

#[cfg(feature = "directory")]
pub use cabinet_directory;

/// Unified prelude: `use cabinet::prelude::*`.
pub mod prelude {
    pub use cabinet_core::prelude::*;
    pub use cabinet_core::{init_tracing, LogFormat};
    pub use cabinet_rest::{
        ClientError, OrderOptions, Payload, QueryBuilder, QueryRequest, QueryResult, RestClient,
        RestConfig, RestError,
    };

    #[cfg(feature = "bio")]
    pub use cabinet_bio::{
        group_entries, normalize_entries, period_label, BiographyGroup, NormalizedCareerEntry,
    };

    #[cfg(feature = "directory")]
    pub use cabinet_directory::{
        DirectoryConfig, DirectoryContext, DirectoryError, DirectoryQuery, Minister, Page,
        Pageable, SortKey,
    };
}
