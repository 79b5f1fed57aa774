//! Role-based access control for the admin console.
//!
//! Everything in this crate is synchronous and side-effect free. Unknown
//! roles, unknown permissions and absent actors never produce errors; they
//! evaluate to the least privileged answer (`false` or an empty list).
//!
//! ## Key Components
//!
//! - **`permission`**: The [`Permission`] identifier, the closed set of
//!   permissions known to the console and their presentation metadata.
//! - **`role`**: The [`Role`] identifier and role metadata.
//! - **`policy`**: [`RolePermissions`], the immutable role to permission map
//!   fixed at process start.
//! - **`evaluator`**: [`PermissionEvaluator`] and the free functions
//!   (`has_permission`, `has_any_permission`, ...) that gate UI rendering and
//!   API authorization.
//! - **`actor`**: [`Actor`], a role plus optional custom permission override,
//!   with `require*` guards that surface denials as `rolegate_core::Error`.
//!
//! ## Custom permission overrides
//!
//! An actor may carry an explicit permission list that replaces (never
//! extends) the permissions of its role. The boolean predicates treat an
//! empty override as "no permissions at all", while
//! [`get_user_permissions`] treats an empty override as "no override" and
//! falls back to the role list. Both behaviours are kept as-is for
//! compatibility with existing user profiles.

pub mod actor;
pub mod evaluator;
pub mod permission;
pub mod policy;
pub mod role;

pub use actor::Actor;
pub use evaluator::{
    default_evaluator, get_permissions_by_category, get_user_permissions, has_all_permissions,
    has_any_permission, has_permission, init_default_evaluator, PermissionEvaluator,
};
pub use permission::{categories, permission_info, Permission, PermissionInfo, PERMISSIONS};
pub use policy::RolePermissions;
pub use role::{role_info, Role, RoleInfo, ROLES};
