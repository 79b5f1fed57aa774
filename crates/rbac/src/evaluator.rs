//! Authorization predicates over a role and an optional permission override.
//!
//! Every function here is total: an absent role, a role missing from the map
//! or an unknown permission evaluates to `false` (or an empty list). Callers
//! gate rendering and API access directly on the returned value.

use crate::permission::{PermissionInfo, PERMISSION_TABLE};
use crate::{Permission, Role, RolePermissions};
use once_cell::sync::OnceCell;
use rolegate_core::{Error, Result};

static DEFAULT_EVALUATOR: OnceCell<PermissionEvaluator> = OnceCell::new();

/// Evaluates authorization questions against a fixed [`RolePermissions`] map
#[derive(Debug, Clone, Default)]
pub struct PermissionEvaluator {
    policy: RolePermissions,
}

impl PermissionEvaluator {
    /// Create an evaluator over the given role map
    #[must_use]
    pub fn new(policy: RolePermissions) -> Self {
        Self { policy }
    }

    /// The role map this evaluator consults
    #[must_use]
    pub fn policy(&self) -> &RolePermissions {
        &self.policy
    }

    /// Whether the actor holds `permission`.
    ///
    /// With `custom` present the role map is not consulted at all, even when
    /// the override is empty: `Some(&[])` denies everything.
    #[must_use]
    pub fn has_permission(
        &self,
        role: Option<&Role>,
        permission: &Permission,
        custom: Option<&[Permission]>,
    ) -> bool {
        let Some(role) = role else {
            return false;
        };

        match custom {
            Some(custom) => custom.contains(permission),
            None => self.policy.grants(role, permission),
        }
    }

    /// Whether the actor holds at least one of `permissions`.
    ///
    /// An empty `permissions` list is never satisfied.
    #[must_use]
    pub fn has_any_permission(
        &self,
        role: Option<&Role>,
        permissions: &[Permission],
        custom: Option<&[Permission]>,
    ) -> bool {
        if role.is_none() {
            return false;
        }
        permissions
            .iter()
            .any(|permission| self.has_permission(role, permission, custom))
    }

    /// Whether the actor holds every one of `permissions`.
    ///
    /// An empty `permissions` list is satisfied by any present role.
    #[must_use]
    pub fn has_all_permissions(
        &self,
        role: Option<&Role>,
        permissions: &[Permission],
        custom: Option<&[Permission]>,
    ) -> bool {
        if role.is_none() {
            return false;
        }
        permissions
            .iter()
            .all(|permission| self.has_permission(role, permission, custom))
    }

    /// The effective permission list of an actor.
    ///
    /// A non-empty `custom` list is returned verbatim. An empty one is
    /// treated as no override and the role list is returned instead, unlike
    /// [`has_permission`](Self::has_permission) where it denies everything.
    #[must_use]
    pub fn get_user_permissions(
        &self,
        role: &Role,
        custom: Option<&[Permission]>,
    ) -> Vec<Permission> {
        match custom {
            Some(custom) if !custom.is_empty() => custom.to_vec(),
            _ => self.policy.permissions_for(role).to_vec(),
        }
    }
}

/// Install the process-wide role map.
///
/// Must run before the first call to [`default_evaluator`] or any of the free
/// functions in this module; the map cannot be replaced afterwards.
pub fn init_default_evaluator(policy: RolePermissions) -> Result<()> {
    DEFAULT_EVALUATOR
        .set(PermissionEvaluator::new(policy))
        .map_err(|_| Error::configuration("the process-wide role map is already initialized"))
}

/// The process-wide evaluator, using the built-in role map unless
/// [`init_default_evaluator`] ran first
pub fn default_evaluator() -> &'static PermissionEvaluator {
    DEFAULT_EVALUATOR.get_or_init(PermissionEvaluator::default)
}

/// See [`PermissionEvaluator::has_permission`]
#[must_use]
pub fn has_permission(
    role: Option<&Role>,
    permission: &Permission,
    custom: Option<&[Permission]>,
) -> bool {
    default_evaluator().has_permission(role, permission, custom)
}

/// See [`PermissionEvaluator::has_any_permission`]
#[must_use]
pub fn has_any_permission(
    role: Option<&Role>,
    permissions: &[Permission],
    custom: Option<&[Permission]>,
) -> bool {
    default_evaluator().has_any_permission(role, permissions, custom)
}

/// See [`PermissionEvaluator::has_all_permissions`]
#[must_use]
pub fn has_all_permissions(
    role: Option<&Role>,
    permissions: &[Permission],
    custom: Option<&[Permission]>,
) -> bool {
    default_evaluator().has_all_permissions(role, permissions, custom)
}

/// See [`PermissionEvaluator::get_user_permissions`]
#[must_use]
pub fn get_user_permissions(role: &Role, custom: Option<&[Permission]>) -> Vec<Permission> {
    default_evaluator().get_user_permissions(role, custom)
}

/// Metadata of every permission in `category`, in presentation order
#[must_use]
pub fn get_permissions_by_category(category: &str) -> Vec<&'static PermissionInfo> {
    PERMISSION_TABLE
        .iter()
        .filter(|info| info.category == category)
        .collect()
}
