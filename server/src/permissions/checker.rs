//! Permission checks against the shared table.

use std::sync::Arc;

use tracing::debug;

use super::guard::{Guard, GuardError};
use super::role::Role;
use super::table::PermissionTable;
use crate::auth::Principal;

/// Answers `(role, resource, action)` queries and evaluates guards.
///
/// Cloning is cheap; every clone shares one immutable table, so checks from
/// concurrent requests need no locking.
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    table: Arc<PermissionTable>,
}

impl PermissionChecker {
    #[must_use]
    pub fn new(table: PermissionTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Checker over the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(PermissionTable::builtin())
    }

    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Whether `role` may perform `action` on `resource`.
    ///
    /// Fails closed: an unknown role, a resource not listed under the role,
    /// or an unlisted action all yield `false`.
    pub fn has_permission(&self, role: &str, resource: &str, action: &str) -> bool {
        role.parse::<Role>()
            .is_ok_and(|role| self.table.contains(role, resource, action))
    }

    /// Evaluate `guard` for the principal attached to a request.
    ///
    /// A missing principal is rejected before the table is consulted.
    /// `Guard::Any` stops at the first granted pair.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        guard: &Guard,
    ) -> Result<(), GuardError> {
        let principal = principal.ok_or(GuardError::Unauthenticated)?;

        let allowed = match guard {
            Guard::Single { resource, action } => {
                self.has_permission(&principal.role, resource, action)
            }
            Guard::Any(pairs) => pairs
                .iter()
                .any(|(resource, action)| self.has_permission(&principal.role, resource, action)),
        };

        if allowed {
            return Ok(());
        }

        debug!(
            user_id = %principal.id,
            role = %principal.role,
            guard = ?guard,
            "Permission denied"
        );
        Err(guard.denial())
    }
}

impl Default for PermissionChecker {
    fn default() -> Self {
        Self::builtin()
    }
}
