//! Loaded configuration values

use rolegate_core::Result;
use rolegate_rbac::{init_default_evaluator, RolePermissions};
use rolegate_utils::network::{init_management_api_scheduler, RateLimitConfig, RequestScheduler};
use serde::{Deserialize, Serialize};

/// On-disk policy document
///
/// ```json
/// { "roles": { "support": ["users:read", "users:update"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    pub roles: RolePermissions,
}

/// Everything rolegate needs at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolegateConfig {
    /// Limits for the management API scheduler
    pub rate_limit: RateLimitConfig,
    /// The role to permission map
    pub roles: RolePermissions,
}

impl RolegateConfig {
    /// Install the role map as the process-wide policy and the limits on
    /// the process-wide management API scheduler.
    ///
    /// Fails if either was already set or read.
    pub fn install(self) -> Result<&'static RequestScheduler> {
        let scheduler = init_management_api_scheduler(self.rate_limit)?;
        init_default_evaluator(self.roles)?;
        tracing::info!(
            max_requests = self.rate_limit.max_requests,
            window_ms = self.rate_limit.window.as_millis() as u64,
            "rolegate configuration installed"
        );
        Ok(scheduler)
    }
}
