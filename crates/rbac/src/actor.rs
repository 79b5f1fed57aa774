//! Authorization guards for a signed-in user

use crate::{Permission, PermissionEvaluator, Role};
use rolegate_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// The authorization-relevant part of a user profile.
///
/// `role` is absent for sessions without an assigned role; such actors are
/// denied everything. `custom_permissions` is the per-user override edited
/// from the console and, when present, replaces the role's permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_permissions: Option<Vec<Permission>>,
}

impl Actor {
    /// An actor with a role and no override
    #[must_use]
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            custom_permissions: None,
        }
    }

    /// An actor with no role
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Attach a custom permission override
    #[must_use]
    pub fn custom_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.custom_permissions = Some(permissions);
        self
    }

    fn custom(&self) -> Option<&[Permission]> {
        self.custom_permissions.as_deref()
    }

    pub fn can(&self, evaluator: &PermissionEvaluator, permission: &Permission) -> bool {
        evaluator.has_permission(self.role.as_ref(), permission, self.custom())
    }

    pub fn can_any(&self, evaluator: &PermissionEvaluator, permissions: &[Permission]) -> bool {
        evaluator.has_any_permission(self.role.as_ref(), permissions, self.custom())
    }

    pub fn can_all(&self, evaluator: &PermissionEvaluator, permissions: &[Permission]) -> bool {
        evaluator.has_all_permissions(self.role.as_ref(), permissions, self.custom())
    }

    /// Effective permissions, empty for an actor without a role
    pub fn effective_permissions(&self, evaluator: &PermissionEvaluator) -> Vec<Permission> {
        match &self.role {
            Some(role) => evaluator.get_user_permissions(role, self.custom()),
            None => Vec::new(),
        }
    }

    /// Fail with [`Error::PermissionDenied`] unless the actor holds `permission`
    pub fn require(&self, evaluator: &PermissionEvaluator, permission: &Permission) -> Result<()> {
        if self.can(evaluator, permission) {
            return Ok(());
        }
        Err(self.denied(permission.as_str()))
    }

    /// Fail unless the actor holds at least one of `permissions`
    pub fn require_any(
        &self,
        evaluator: &PermissionEvaluator,
        permissions: &[Permission],
    ) -> Result<()> {
        if self.can_any(evaluator, permissions) {
            return Ok(());
        }
        Err(self.denied(&join(permissions, " | ")))
    }

    /// Fail unless the actor holds all of `permissions`
    pub fn require_all(
        &self,
        evaluator: &PermissionEvaluator,
        permissions: &[Permission],
    ) -> Result<()> {
        if self.can_all(evaluator, permissions) {
            return Ok(());
        }
        Err(self.denied(&join(permissions, " & ")))
    }

    fn denied(&self, operation: &str) -> Error {
        let message = match (&self.role, &self.custom_permissions) {
            (None, _) => "no role assigned".to_string(),
            (Some(role), Some(_)) => format!("custom permissions of role '{role}' do not grant it"),
            (Some(role), None) => format!("role '{role}' does not grant it"),
        };
        tracing::debug!(operation = %operation, reason = %message, "authorization denied");
        Error::permission_denied(operation, message)
    }
}

fn join(permissions: &[Permission], separator: &str) -> String {
    permissions
        .iter()
        .map(Permission::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_passes_for_granted_permission() {
        let eval = PermissionEvaluator::default();
        let actor = Actor::with_role(Role::SALES_SENIOR);
        assert!(actor.require(&eval, &Permission::REPORTS_CREATE).is_ok());
        assert!(actor
            .require_all(&eval, &[Permission::USERS_READ, Permission::REPORTS_VIEW])
            .is_ok());
    }

    #[test]
    fn test_require_reports_denied_operation() {
        let eval = PermissionEvaluator::default();
        let err = Actor::with_role(Role::CLIENT)
            .require(&eval, &Permission::USERS_DELETE)
            .unwrap_err();
        assert!(err.is_permission_denied());
        assert_eq!(
            err.to_string(),
            "permission denied for users:delete: role 'client' does not grant it"
        );
    }

    #[test]
    fn test_anonymous_actor_is_denied_everything() {
        let eval = PermissionEvaluator::default();
        let actor = Actor::anonymous();
        assert!(!actor.can(&eval, &Permission::DASHBOARD_VIEW_OWN));
        assert!(actor.require_all(&eval, &[]).is_err());
        assert!(actor.effective_permissions(&eval).is_empty());
    }

    #[test]
    fn test_require_any_lists_alternatives() {
        let eval = PermissionEvaluator::default();
        let err = Actor::with_role(Role::CLIENT)
            .custom_permissions(vec![])
            .require_any(&eval, &[Permission::USERS_READ, Permission::DASHBOARD_VIEW_OWN])
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("users:read | dashboard:view_own"));
        assert!(text.contains("custom permissions"));
    }

    #[test]
    fn test_effective_permissions_follow_override_rules() {
        let eval = PermissionEvaluator::default();
        let actor = Actor::with_role(Role::CLIENT).custom_permissions(vec![]);
        // Empty override: denied by the predicates, role list for display
        assert!(!actor.can(&eval, &Permission::DASHBOARD_VIEW_OWN));
        assert_eq!(
            actor.effective_permissions(&eval),
            vec![Permission::DASHBOARD_VIEW_OWN]
        );
    }

    #[test]
    fn test_deserialize_profile_metadata() {
        let json = r#"{ "role": "sales_junior", "customPermissions": ["reports:create"] }"#;
        let actor: Actor = serde_json::from_str(json).unwrap();
        assert_eq!(actor.role, Some(Role::SALES_JUNIOR));
        assert_eq!(actor.custom_permissions, Some(vec![Permission::REPORTS_CREATE]));

        let actor: Actor = serde_json::from_str("{}").unwrap();
        assert_eq!(actor, Actor::anonymous());
    }
}
