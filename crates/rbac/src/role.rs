//! Role identifiers and presentation metadata

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Type-safe wrapper for role names such as `admin`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role::from_static("admin");
    pub const SALES_SENIOR: Role = Role::from_static("sales_senior");
    pub const SALES_JUNIOR: Role = Role::from_static("sales_junior");
    pub const CLIENT: Role = Role::from_static("client");

    /// Create a role from an arbitrary name
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Create a role from a static name in const context
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Role {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&'static str> for Role {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

/// Every role known to the console, most privileged first
pub const ROLES: &[Role] = &[Role::ADMIN, Role::SALES_SENIOR, Role::SALES_JUNIOR, Role::CLIENT];

/// Presentation metadata for a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub id: Role,
    pub label: &'static str,
    pub description: &'static str,
}

const ROLE_TABLE: &[RoleInfo] = &[
    RoleInfo {
        id: Role::ADMIN,
        label: "Administrator",
        description: "Full access to users, dashboards, reports and settings",
    },
    RoleInfo {
        id: Role::SALES_SENIOR,
        label: "Senior sales",
        description: "Reads users, sees every dashboard and builds reports",
    },
    RoleInfo {
        id: Role::SALES_JUNIOR,
        label: "Junior sales",
        description: "Sees their own dashboard and reads reports",
    },
    RoleInfo {
        id: Role::CLIENT,
        label: "Client",
        description: "Sees their own dashboard only",
    },
];

/// Look up the metadata for a role
#[must_use]
pub fn role_info(role: &Role) -> Option<&'static RoleInfo> {
    ROLE_TABLE.iter().find(|info| &info.id == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_metadata() {
        for role in ROLES {
            assert!(role_info(role).is_some(), "missing metadata for {role}");
        }
        assert!(role_info(&Role::new("auditor")).is_none());
    }

    #[test]
    fn test_role_deserializes_from_plain_string() {
        let role: Role = serde_json::from_str("\"sales_senior\"").unwrap();
        assert_eq!(role, Role::SALES_SENIOR);
        assert_eq!(role.to_string(), "sales_senior");
    }
}
