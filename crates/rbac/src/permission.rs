//! Permission identifiers and presentation metadata

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Type-safe wrapper for permission identifiers such as `users:read`.
///
/// The console works with a closed set of permissions (see [`PERMISSIONS`]),
/// but identifiers arriving from user profiles or policy files are not
/// validated. An identifier outside the set is simply never granted by the
/// default role map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const USERS_READ: Permission = Permission::from_static("users:read");
    pub const USERS_CREATE: Permission = Permission::from_static("users:create");
    pub const USERS_UPDATE: Permission = Permission::from_static("users:update");
    pub const USERS_DELETE: Permission = Permission::from_static("users:delete");
    pub const USERS_MANAGE_ROLES: Permission = Permission::from_static("users:manage_roles");
    pub const DASHBOARD_VIEW_ALL: Permission = Permission::from_static("dashboard:view_all");
    pub const DASHBOARD_VIEW_OWN: Permission = Permission::from_static("dashboard:view_own");
    pub const REPORTS_VIEW: Permission = Permission::from_static("reports:view");
    pub const REPORTS_CREATE: Permission = Permission::from_static("reports:create");
    pub const SETTINGS_MANAGE: Permission = Permission::from_static("settings:manage");

    /// Create a permission from an arbitrary identifier
    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    /// Create a permission from a static identifier in const context
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `resource` part of a `resource:action` identifier
    #[must_use]
    pub fn resource(&self) -> &str {
        self.as_str()
            .split_once(':')
            .map_or(self.as_str(), |(resource, _)| resource)
    }

    /// Whether the identifier belongs to the console's closed permission set
    #[must_use]
    pub fn is_known(&self) -> bool {
        PERMISSIONS.contains(self)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Permission {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Permission {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl From<&'static str> for Permission {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

/// Every permission known to the console, in presentation order
pub const PERMISSIONS: &[Permission] = &[
    Permission::USERS_READ,
    Permission::USERS_CREATE,
    Permission::USERS_UPDATE,
    Permission::USERS_DELETE,
    Permission::USERS_MANAGE_ROLES,
    Permission::DASHBOARD_VIEW_ALL,
    Permission::DASHBOARD_VIEW_OWN,
    Permission::REPORTS_VIEW,
    Permission::REPORTS_CREATE,
    Permission::SETTINGS_MANAGE,
];

/// Presentation metadata for a permission.
///
/// Not consulted by any authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionInfo {
    pub id: Permission,
    pub label: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

impl PermissionInfo {
    const fn new(
        id: Permission,
        label: &'static str,
        description: &'static str,
        category: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            description,
            category,
        }
    }
}

pub(crate) const PERMISSION_TABLE: &[PermissionInfo] = &[
    PermissionInfo::new(
        Permission::USERS_READ,
        "View users",
        "List users and open their profiles",
        "users",
    ),
    PermissionInfo::new(
        Permission::USERS_CREATE,
        "Create users",
        "Invite or create new user accounts",
        "users",
    ),
    PermissionInfo::new(
        Permission::USERS_UPDATE,
        "Edit users",
        "Change profile details of existing users",
        "users",
    ),
    PermissionInfo::new(
        Permission::USERS_DELETE,
        "Delete users",
        "Remove user accounts permanently",
        "users",
    ),
    PermissionInfo::new(
        Permission::USERS_MANAGE_ROLES,
        "Manage roles",
        "Assign roles and custom permissions to users",
        "users",
    ),
    PermissionInfo::new(
        Permission::DASHBOARD_VIEW_ALL,
        "View all dashboards",
        "See dashboard data for every account",
        "dashboard",
    ),
    PermissionInfo::new(
        Permission::DASHBOARD_VIEW_OWN,
        "View own dashboard",
        "See dashboard data for the signed-in account only",
        "dashboard",
    ),
    PermissionInfo::new(
        Permission::REPORTS_VIEW,
        "View reports",
        "Open generated reports",
        "reports",
    ),
    PermissionInfo::new(
        Permission::REPORTS_CREATE,
        "Create reports",
        "Generate and export new reports",
        "reports",
    ),
    PermissionInfo::new(
        Permission::SETTINGS_MANAGE,
        "Manage settings",
        "Change console-wide settings",
        "settings",
    ),
];

/// Look up the metadata for a permission
#[must_use]
pub fn permission_info(id: &Permission) -> Option<&'static PermissionInfo> {
    PERMISSION_TABLE.iter().find(|info| &info.id == id)
}

/// Distinct permission categories, in presentation order
#[must_use]
pub fn categories() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for info in PERMISSION_TABLE {
        if !seen.contains(&info.category) {
            seen.push(info.category);
        }
    }
    seen
}
