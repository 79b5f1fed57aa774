//! Configuration loader for rolegate
//!
//! Precedence, lowest first: built-in defaults, values given to the
//! builder, environment variables. A policy file replaces the default role
//! map as a whole; there is no merging of role entries.

use crate::types::{PolicyFile, RolegateConfig};
use rolegate_core::{
    constants::{
        DEFAULT_ENV_PREFIX, POLICY_FILE_SUFFIX, RATE_LIMIT_MAX_REQUESTS_SUFFIX,
        RATE_LIMIT_RETRY_AFTER_MS_SUFFIX, RATE_LIMIT_WINDOW_MS_SUFFIX,
    },
    Error, Result, ResultExt,
};
use rolegate_rbac::RolePermissions;
use rolegate_utils::network::RateLimitConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Builder that resolves a [`RolegateConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Explicit policy file, overridden by `<PREFIX>_POLICY_FILE`
    policy_file: Option<PathBuf>,
    /// Prefix of the environment variables consulted
    env_prefix: String,
    /// Base limits before environment overrides
    rate_limit: RateLimitConfig,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with the default prefix and limits
    pub fn new() -> Self {
        Self {
            policy_file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Read the role map from `path`
    pub fn policy_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_file = Some(path.into());
        self
    }

    /// Use `prefix` instead of `ROLEGATE` for environment variables
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Base rate limits, still subject to environment overrides
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Resolve the configuration
    pub fn load(self) -> Result<RolegateConfig> {
        let rate_limit = self.resolve_rate_limit()?;

        let policy_path = self
            .env_var(POLICY_FILE_SUFFIX)
            .map(PathBuf::from)
            .or_else(|| self.policy_file.clone());

        let roles = match policy_path {
            Some(path) => load_policy_file(&path)?,
            None => RolePermissions::default(),
        };

        log::debug!(
            "Loaded configuration with {} roles, {} requests per {:?}",
            roles.len(),
            rate_limit.max_requests,
            rate_limit.window
        );

        Ok(RolegateConfig { rate_limit, roles })
    }

    fn resolve_rate_limit(&self) -> Result<RateLimitConfig> {
        let mut config = self.rate_limit;

        if let Some(max) = self.parse_env::<u32>(RATE_LIMIT_MAX_REQUESTS_SUFFIX)? {
            config.max_requests = max;
        }
        if let Some(ms) = self.parse_env::<u64>(RATE_LIMIT_WINDOW_MS_SUFFIX)? {
            config.window = Duration::from_millis(ms);
        }
        if let Some(ms) = self.parse_env::<u64>(RATE_LIMIT_RETRY_AFTER_MS_SUFFIX)? {
            config.retry_after = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    fn var_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    fn env_var(&self, suffix: &str) -> Option<String> {
        std::env::var(self.var_name(suffix))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn parse_env<T: FromStr>(&self, suffix: &str) -> Result<Option<T>> {
        let Some(raw) = self.env_var(suffix) else {
            return Ok(None);
        };

        raw.trim().parse().map(Some).map_err(|_| {
            Error::configuration(format!(
                "{} must be a positive integer, got '{raw}'",
                self.var_name(suffix)
            ))
        })
    }
}

/// Read a JSON policy file
pub fn load_policy_file(path: &Path) -> Result<RolePermissions> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "read policy file", e))?;

    let policy: PolicyFile = serde_json::from_str(&content)
        .with_context(|| format!("invalid policy file {}", path.display()))?;

    if policy.roles.is_empty() {
        tracing::warn!(
            path = %path.display(),
            "policy file defines no roles, every check will be denied"
        );
    }

    Ok(policy.roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_rbac::{Permission, Role};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VARS: &[&str] = &[
        "ROLEGATE_RATE_LIMIT_MAX_REQUESTS",
        "ROLEGATE_RATE_LIMIT_WINDOW_MS",
        "ROLEGATE_RATE_LIMIT_RETRY_AFTER_MS",
        "ROLEGATE_POLICY_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn policy(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, RolegateConfig::default());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_builder_limits() {
        clear_env();
        std::env::set_var("ROLEGATE_RATE_LIMIT_MAX_REQUESTS", "25");
        std::env::set_var("ROLEGATE_RATE_LIMIT_WINDOW_MS", " 2000 ");

        let config = ConfigLoader::new()
            .rate_limit(RateLimitConfig::from_millis(5, 500, 250))
            .load()
            .unwrap();
        clear_env();

        assert_eq!(config.rate_limit, RateLimitConfig::from_millis(25, 2_000, 250));
    }

    #[test]
    #[serial]
    fn test_invalid_environment_values_are_rejected() {
        for (var, value) in [
            ("ROLEGATE_RATE_LIMIT_MAX_REQUESTS", "many"),
            ("ROLEGATE_RATE_LIMIT_WINDOW_MS", "-5"),
            ("ROLEGATE_RATE_LIMIT_RETRY_AFTER_MS", "0"),
        ] {
            clear_env();
            std::env::set_var(var, value);
            let err = ConfigLoader::new().load().unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{var}={value}: {err}");
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn test_custom_prefix() {
        clear_env();
        std::env::set_var("CONSOLE_RATE_LIMIT_MAX_REQUESTS", "3");
        let config = ConfigLoader::new().env_prefix("CONSOLE").load().unwrap();
        std::env::remove_var("CONSOLE_RATE_LIMIT_MAX_REQUESTS");
        assert_eq!(config.rate_limit.max_requests, 3);
    }

    #[test]
    #[serial]
    fn test_policy_file_replaces_default_roles() {
        clear_env();
        let file =
            policy(r#"{ "roles": { "support": ["users:read", "users:update", "users:read"] } }"#);

        let config = ConfigLoader::new().policy_file(file.path()).load().unwrap();

        let support = Role::new("support");
        assert_eq!(config.roles.len(), 1);
        assert_eq!(
            config.roles.permissions_for(&support),
            &[Permission::USERS_READ, Permission::USERS_UPDATE]
        );
        assert!(config.roles.permissions_for(&Role::ADMIN).is_empty());
    }

    #[test]
    #[serial]
    fn test_policy_file_from_environment_wins() {
        clear_env();
        let explicit = policy(r#"{ "roles": { "a": [] } }"#);
        let from_env = policy(r#"{ "roles": { "b": ["reports:view"] } }"#);
        std::env::set_var("ROLEGATE_POLICY_FILE", from_env.path());

        let config = ConfigLoader::new().policy_file(explicit.path()).load().unwrap();
        clear_env();

        let roles: Vec<&str> = config.roles.roles().map(Role::as_str).collect();
        assert_eq!(roles, vec!["b"]);
    }

    #[test]
    #[serial]
    fn test_missing_policy_file() {
        clear_env();
        let err = ConfigLoader::new()
            .policy_file("/nonexistent/rolegate/policy.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    #[serial]
    fn test_malformed_policy_file() {
        clear_env();
        for json in [
            r#"{ "roles": "#,
            r#"{ "rules": {} }"#,
            r#"{ "roles": { "a": "users:read" } }"#,
        ] {
            let file = policy(json);
            let err = ConfigLoader::new()
                .policy_file(file.path())
                .load()
                .unwrap_err();
            assert!(matches!(err, Error::Json { .. }), "{json}: {err}");
            let expected = format!("JSON error: invalid policy file {}: ", file.path().display());
            assert!(err.to_string().starts_with(&expected), "{err}");
        }
    }
}
