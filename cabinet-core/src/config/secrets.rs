use super::ConfigError;

/// Resolves the reference inside a `${...}` placeholder.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Default resolver for environment variables and files.
///
/// - `${VAR_NAME}` / `${env:VAR_NAME}` read an environment variable
/// - `${file:/path/to/secret}` reads a file (trimmed)
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        let reference = reference.trim();
        if let Some(path) = reference.strip_prefix("file:") {
            let path = path.trim();
            return std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| ConfigError::Load(format!("Secret file '{path}': {e}")));
        }
        let var = reference.strip_prefix("env:").unwrap_or(reference).trim();
        std::env::var(var).map_err(|_| ConfigError::NotFound(format!("env:{var}")))
    }
}

/// Replace every `${...}` placeholder in `value`.
pub fn resolve_placeholders(
    value: &str,
    resolver: &dyn SecretResolver,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| ConfigError::Load(format!("Unclosed placeholder in: {value}")))?;
        out.push_str(&rest[..start]);
        out.push_str(&resolver.resolve(&rest[start + 2..start + end])?);
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl SecretResolver for Fixed {
        fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
            match reference {
                "HOST" => Ok("db.local".into()),
                "PORT" => Ok("5432".into()),
                other => Err(ConfigError::NotFound(other.into())),
            }
        }
    }

    #[test]
    fn replaces_every_placeholder() {
        let out = resolve_placeholders("https://${HOST}:${PORT}/rest", &Fixed).unwrap();
        assert_eq!(out, "https://db.local:5432/rest");
    }

    #[test]
    fn plain_value_is_untouched() {
        assert_eq!(resolve_placeholders("plain", &Fixed).unwrap(), "plain");
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(matches!(
            resolve_placeholders("${HOST", &Fixed),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn unknown_reference_fails() {
        assert!(matches!(
            resolve_placeholders("${NOPE}", &Fixed),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn file_reference_is_read_and_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anon.key");
        std::fs::write(&path, "secret-key\n").unwrap();

        let reference = format!("${{file:{}}}", path.display());
        let out = resolve_placeholders(&reference, &DefaultSecretResolver).unwrap();
        assert_eq!(out, "secret-key");
    }
}
