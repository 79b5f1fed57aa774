/// Constants used throughout the rolegate codebase
// Environment variable names
pub const ROLEGATE_LOG_VAR: &str = "ROLEGATE_LOG";
pub const DEFAULT_ENV_PREFIX: &str = "ROLEGATE";

// Suffixes joined to the env prefix by the config loader
pub const POLICY_FILE_SUFFIX: &str = "POLICY_FILE";
pub const RATE_LIMIT_MAX_REQUESTS_SUFFIX: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const RATE_LIMIT_WINDOW_MS_SUFFIX: &str = "RATE_LIMIT_WINDOW_MS";
pub const RATE_LIMIT_RETRY_AFTER_MS_SUFFIX: &str = "RATE_LIMIT_RETRY_AFTER_MS";

// Management API limits
pub const DEFAULT_MAX_REQUESTS: u32 = 10;
pub const DEFAULT_WINDOW_MS: u64 = 1_000;
pub const DEFAULT_RETRY_AFTER_MS: u64 = 1_000;

// Retry ceiling for rate-limited requests (attempts = retries + 1)
pub const MAX_RATE_LIMIT_RETRIES: usize = 3;
pub const MAX_BACKOFF_MS: u64 = 30_000;
pub const MAX_JITTER_MS: u64 = 1_000;
