//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- operator from a Bearer token with a live session.
//! - [`rbac::RequireAdmin`] -- `administration` role.
//! - [`rbac::RequireOperator`] -- `operator` (cashier) role.
//! - [`rbac::RequireCaptain`] -- `captain` or `administration` role.
//! - [`rbac::RequireAuth`] -- any authenticated operator.

pub mod auth;
pub mod rbac;
