use cabinet_core::config::{
    CabinetConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver,
    PropertyMeta,
};
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = CabinetConfig::empty();
    assert!(matches!(
        config.get::<String>("cabinet.backend.url"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_set_and_get() {
    let mut config = CabinetConfig::empty();
    config.set("cabinet.directory.persons", ConfigValue::String("ministres".into()));
    assert_eq!(
        config.get::<String>("cabinet.directory.persons").unwrap(),
        "ministres"
    );
}

#[test]
fn test_get_or_and_get_opt() {
    let mut config = CabinetConfig::empty();
    config.set("cabinet.directory.careers", ConfigValue::Null);
    assert_eq!(config.get_or("cabinet.directory.ttl", 300u64), 300);
    assert_eq!(
        config.get_opt::<String>("cabinet.directory.careers").unwrap(),
        None
    );
    assert_eq!(config.get_opt::<String>("missing").unwrap(), None);
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
cabinet:
  backend:
    url: "https://project.example.co"
    timeout: 10
  directory:
    persons: "ministres"
"#;
    let config = CabinetConfig::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(
        config.get::<String>("cabinet.backend.url").unwrap(),
        "https://project.example.co"
    );
    assert_eq!(config.get::<u64>("cabinet.backend.timeout").unwrap(), 10);
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_invalid_yaml_is_a_load_error() {
    let err = CabinetConfig::from_yaml_str("cabinet: [unclosed", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_type_mismatch() {
    let config = CabinetConfig::from_yaml_str("cabinet:\n  ttl: soon\n", "test").unwrap();
    assert!(matches!(
        config.get::<u64>("cabinet.ttl"),
        Err(ConfigError::TypeMismatch { expected: "i64", .. })
    ));
}

struct Backend {
    url: String,
    timeout: Option<u64>,
}

impl ConfigProperties for Backend {
    fn prefix() -> &'static str {
        "cabinet.backend"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta {
                key: "url",
                type_name: "String",
                required: true,
                description: "base URL",
            },
            PropertyMeta {
                key: "timeout",
                type_name: "u64",
                required: false,
                description: "timeout in seconds",
            },
        ]
    }

    fn from_config(config: &CabinetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get(&Self::key("url"))?,
            timeout: config.get_opt(&Self::key("timeout"))?,
        })
    }
}

#[test]
fn test_typed_section() {
    let config =
        CabinetConfig::from_yaml_str("cabinet:\n  backend:\n    url: http://x\n", "test").unwrap();
    let backend: Backend = config.section().unwrap();
    assert_eq!(backend.url, "http://x");
    assert_eq!(backend.timeout, None);
    assert!(Backend::missing_keys(&config).is_empty());
}

#[test]
fn test_missing_required_keys() {
    let config = CabinetConfig::empty();
    assert_eq!(
        Backend::missing_keys(&config),
        vec!["cabinet.backend.url".to_string()]
    );
    assert!(config.section::<Backend>().is_err());
}

#[test]
#[serial]
fn test_profile_file_overrides_base() {
    std::env::remove_var("CABINET_PROFILE");
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "cabinet:\n  directory:\n    persons: ministres\n    ttl: 60\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-prod.yaml"),
        "cabinet:\n  directory:\n    ttl: 600\n",
    )
    .unwrap();

    let config = CabinetConfig::load_from(dir.path(), "prod", &DefaultSecretResolver).unwrap();
    assert_eq!(config.profile(), "prod");
    assert_eq!(
        config.get::<String>("cabinet.directory.persons").unwrap(),
        "ministres"
    );
    assert_eq!(config.get::<u64>("cabinet.directory.ttl").unwrap(), 600);
}

#[test]
#[serial]
fn test_env_overlay_and_placeholders() {
    std::env::remove_var("CABINET_PROFILE");
    std::env::set_var("CABINET_TEST_ANON_KEY", "anon-123");
    std::env::set_var("CABINET_BACKEND_URL", "https://override.example.co");

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "cabinet:\n  backend:\n    url: http://localhost\n    key: \"${CABINET_TEST_ANON_KEY}\"\n",
    )
    .unwrap();

    let config = CabinetConfig::load_from(dir.path(), "dev", &DefaultSecretResolver).unwrap();
    assert_eq!(config.get::<String>("cabinet.backend.key").unwrap(), "anon-123");
    assert_eq!(
        config.get::<String>("cabinet.backend.url").unwrap(),
        "https://override.example.co"
    );

    std::env::remove_var("CABINET_TEST_ANON_KEY");
    std::env::remove_var("CABINET_BACKEND_URL");
}

#[test]
#[serial]
fn test_dotenv_file_feeds_placeholders() {
    std::env::remove_var("CABINET_PROFILE");
    std::env::remove_var("CABINET_DOTENV_SECRET");
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "CABINET_DOTENV_SECRET=from-dotenv\n").unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "cabinet:\n  backend:\n    key: \"${env:CABINET_DOTENV_SECRET}\"\n",
    )
    .unwrap();

    let config = CabinetConfig::load_from(dir.path(), "dev", &DefaultSecretResolver).unwrap();
    assert_eq!(config.get::<String>("cabinet.backend.key").unwrap(), "from-dotenv");

    std::env::remove_var("CABINET_DOTENV_SECRET");
}
