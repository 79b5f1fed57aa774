//! The role to permission map

use crate::permission::Permission;
use crate::role::Role;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Immutable mapping from each role to its ordered permission list.
///
/// Built once at process start, either from the default table or from a
/// policy file, and never mutated afterwards. Roles missing from the map
/// have no permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<Role, Vec<Permission>>",
    into = "IndexMap<Role, Vec<Permission>>"
)]
pub struct RolePermissions {
    roles: IndexMap<Role, Vec<Permission>>,
}

impl RolePermissions {
    /// Build a map from `(role, permissions)` entries.
    ///
    /// Entry and permission order are kept. Duplicate permissions within a
    /// role are dropped; a repeated role replaces the earlier entry.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, Vec<Permission>)>,
    {
        let roles = entries
            .into_iter()
            .map(|(role, permissions)| (role, dedup_ordered(permissions)))
            .collect();
        Self { roles }
    }

    /// A map with no roles at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            roles: IndexMap::new(),
        }
    }

    /// Permissions granted to `role`, empty for roles not in the map
    #[must_use]
    pub fn permissions_for(&self, role: &Role) -> &[Permission] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `role` is granted `permission`
    #[must_use]
    pub fn grants(&self, role: &Role, permission: &Permission) -> bool {
        self.permissions_for(role).contains(permission)
    }

    /// Roles present in the map, in insertion order
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.keys()
    }

    /// Number of roles in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the map has no roles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        Self::from_entries([
            (
                Role::ADMIN,
                vec![
                    Permission::USERS_READ,
                    Permission::USERS_CREATE,
                    Permission::USERS_UPDATE,
                    Permission::USERS_DELETE,
                    Permission::USERS_MANAGE_ROLES,
                    Permission::DASHBOARD_VIEW_ALL,
                    Permission::REPORTS_VIEW,
                    Permission::REPORTS_CREATE,
                    Permission::SETTINGS_MANAGE,
                ],
            ),
            (
                Role::SALES_SENIOR,
                vec![
                    Permission::USERS_READ,
                    Permission::DASHBOARD_VIEW_ALL,
                    Permission::REPORTS_VIEW,
                    Permission::REPORTS_CREATE,
                ],
            ),
            (
                Role::SALES_JUNIOR,
                vec![Permission::DASHBOARD_VIEW_OWN, Permission::REPORTS_VIEW],
            ),
            (Role::CLIENT, vec![Permission::DASHBOARD_VIEW_OWN]),
        ])
    }
}

impl From<IndexMap<Role, Vec<Permission>>> for RolePermissions {
    fn from(roles: IndexMap<Role, Vec<Permission>>) -> Self {
        Self::from_entries(roles)
    }
}

impl From<RolePermissions> for IndexMap<Role, Vec<Permission>> {
    fn from(policy: RolePermissions) -> Self {
        policy.roles
    }
}

fn dedup_ordered(permissions: Vec<Permission>) -> Vec<Permission> {
    let mut unique: Vec<Permission> = Vec::with_capacity(permissions.len());
    for permission in permissions {
        if !unique.contains(&permission) {
            unique.push(permission);
        }
    }
    unique
}
