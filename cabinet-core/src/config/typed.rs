use super::{CabinetConfig, ConfigError};

/// Metadata about a single configuration property.
#[derive(Debug, Clone)]
pub struct PropertyMeta {
    /// Key relative to the section prefix (e.g. `"url"`).
    pub key: &'static str,
    /// Rust type name (e.g. `"String"`).
    pub type_name: &'static str,
    /// Whether the property must be present.
    pub required: bool,
    pub description: &'static str,
}

/// A strongly-typed configuration section.
///
/// ```ignore
/// impl ConfigProperties for RestConfig {
///     fn prefix() -> &'static str { "cabinet.backend" }
///     fn properties() -> Vec<PropertyMeta> { ... }
///     fn from_config(config: &CabinetConfig) -> Result<Self, ConfigError> { ... }
/// }
/// ```
pub trait ConfigProperties: Sized {
    /// Key prefix of the section (e.g. `"cabinet.backend"`).
    fn prefix() -> &'static str;

    /// Metadata about the expected properties.
    fn properties() -> Vec<PropertyMeta>;

    /// Construct the section from a loaded configuration.
    fn from_config(config: &CabinetConfig) -> Result<Self, ConfigError>;

    /// Absolute key of a property in this section.
    fn key(property: &str) -> String {
        format!("{}.{property}", Self::prefix())
    }

    /// Required keys that are absent from `config`, as absolute keys.
    fn missing_keys(config: &CabinetConfig) -> Vec<String> {
        Self::properties()
            .into_iter()
            .filter(|p| p.required)
            .map(|p| Self::key(p.key))
            .filter(|key| !config.contains_key(key))
            .collect()
    }
}
