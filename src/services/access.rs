//! Centralized mutation policy.
//!
//! Every mutating and reporting operation consults these functions instead
//! of comparing role strings inline. They are pure functions of their
//! inputs and are re-evaluated on every request; the session layer re-reads
//! the actor's role from the store, so a role change takes effect on the
//! next request.

use crate::entities::projects;
use crate::models::error::ApiError;
use crate::models::user::Role;
use crate::session::AuthUser;

/// Whether `actor` may mutate `project`.
///
/// Admins may edit anything; developers only their own listings; investors
/// and anonymous callers nothing.
pub fn can_edit_project(actor: Option<&AuthUser>, project: &projects::Model) -> bool {
    match actor {
        None => false,
        Some(actor) => match actor.role {
            Role::Admin => true,
            Role::Developer => actor.id == project.user_id,
            Role::Investor => false,
        },
    }
}

/// Whether `actor` may create a new listing.
pub fn can_create_project(actor: &AuthUser) -> bool {
    matches!(actor.role, Role::Developer | Role::Admin)
}

/// Gate for reporting/export and account administration.
pub fn require_admin(actor: &AuthUser) -> Result<(), ApiError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied("Administrator access required"))
    }
}
