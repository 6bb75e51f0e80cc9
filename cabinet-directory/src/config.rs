use std::time::Duration;

use cabinet_core::{CabinetConfig, ConfigError, ConfigProperties, PropertyMeta};

/// Table names and memo settings for the directory.
///
/// ```yaml
/// cabinet:
///   directory:
///     persons: "ministres"
///     careers: "parcours"     # optional
///     owner: "ministre_id"
///     ttl: 300                # seconds, 0 disables the memo
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub persons_table: String,
    /// Without a careers table every biography is empty.
    pub careers_table: Option<String>,
    /// Column on the careers table referencing the person.
    pub owner_column: String,
    pub memo_ttl_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            persons_table: "ministres".to_string(),
            careers_table: None,
            owner_column: "ministre_id".to_string(),
            memo_ttl_secs: 300,
        }
    }
}

impl DirectoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons_table(mut self, table: impl Into<String>) -> Self {
        self.persons_table = table.into();
        self
    }

    pub fn with_careers_table(mut self, table: impl Into<String>) -> Self {
        self.careers_table = Some(table.into());
        self
    }

    pub fn with_owner_column(mut self, column: impl Into<String>) -> Self {
        self.owner_column = column.into();
        self
    }

    pub fn with_memo_ttl(mut self, secs: u64) -> Self {
        self.memo_ttl_secs = secs;
        self
    }

    pub fn memo_ttl(&self) -> Duration {
        Duration::from_secs(self.memo_ttl_secs)
    }
}

impl ConfigProperties for DirectoryConfig {
    fn prefix() -> &'static str {
        "cabinet.directory"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta {
                key: "persons",
                type_name: "String",
                required: false,
                description: "Table holding ministers",
            },
            PropertyMeta {
                key: "careers",
                type_name: "String",
                required: false,
                description: "Table holding career rows",
            },
            PropertyMeta {
                key: "owner",
                type_name: "String",
                required: false,
                description: "Careers column referencing the minister",
            },
            PropertyMeta {
                key: "ttl",
                type_name: "u64",
                required: false,
                description: "Biography memo lifetime in seconds",
            },
        ]
    }

    fn from_config(config: &CabinetConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            persons_table: config
                .get_opt(&Self::key("persons"))?
                .unwrap_or(defaults.persons_table),
            careers_table: config
                .get_opt::<String>(&Self::key("careers"))?
                .filter(|t| !t.trim().is_empty()),
            owner_column: config
                .get_opt(&Self::key("owner"))?
                .unwrap_or(defaults.owner_column),
            memo_ttl_secs: config
                .get_opt(&Self::key("ttl"))?
                .unwrap_or(defaults.memo_ttl_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let config: DirectoryConfig = CabinetConfig::empty().section().unwrap();
        assert_eq!(config, DirectoryConfig::default());
        assert!(DirectoryConfig::missing_keys(&CabinetConfig::empty()).is_empty());
    }

    #[test]
    fn reads_section() {
        let yaml = "cabinet:\n  directory:\n    persons: membres\n    careers: parcours\n    owner: membre_id\n    ttl: 0\n";
        let config: DirectoryConfig = CabinetConfig::from_yaml_str(yaml, "test")
            .unwrap()
            .section()
            .unwrap();
        assert_eq!(
            config,
            DirectoryConfig::new()
                .with_persons_table("membres")
                .with_careers_table("parcours")
                .with_owner_column("membre_id")
                .with_memo_ttl(0)
        );
        assert_eq!(config.memo_ttl(), Duration::ZERO);
    }

    #[test]
    fn blank_careers_table_is_none() {
        let config: DirectoryConfig =
            CabinetConfig::from_yaml_str("cabinet:\n  directory:\n    careers: \"\"\n", "test")
                .unwrap()
                .section()
                .unwrap();
        assert_eq!(config.careers_table, None);
    }
}
