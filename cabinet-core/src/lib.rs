//! Shared runtime pieces for Cabinet: layered configuration, tracing
//! bootstrap, and candidate-key field lookup over JSON rows.

pub mod config;
pub mod logging;
pub mod row;

pub use config::{
    CabinetConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver,
    FromConfigValue, PropertyMeta, SecretResolver,
};
pub use logging::{init_tracing, LogFormat};
pub use row::{Candidates, RowView};

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{CabinetConfig, ConfigError, ConfigProperties, RowView};
}
