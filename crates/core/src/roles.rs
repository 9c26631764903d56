//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `operators.role`.

pub const ROLE_OPERATOR: &str = "operator";
pub const ROLE_CAPTAIN: &str = "captain";
pub const ROLE_ADMIN: &str = "administration";

/// Every role an operator account may hold.
pub const ALL_ROLES: &[&str] = &[ROLE_OPERATOR, ROLE_CAPTAIN, ROLE_ADMIN];

/// Returns `true` if `role` is one of [`ALL_ROLES`].
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
