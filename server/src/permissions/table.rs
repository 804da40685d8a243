//! Role to resource to action permission table.
//!
//! The table is plain data: changing what a role may do means editing
//! [`BUILTIN_GRANTS`] or shipping a JSON file of the same shape, never code.
//! Resources and actions are open-ended strings, so new business actions
//! (`approve`, `refund`, ...) need no type changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::role::Role;

/// Resource name to the ordered, duplicate-free list of allowed actions.
pub type ResourceGrants = BTreeMap<String, Vec<String>>;

/// Built-in grants of the booking platform.
pub const BUILTIN_GRANTS: &[(Role, &[(&str, &[&str])])] = &[
    (
        Role::Admin,
        &[
            ("users", &["create", "read", "update", "delete"]),
            ("roles", &["read"]),
            ("courts", &["create", "read", "update", "delete", "approve"]),
            (
                "bookings",
                &["create", "read", "update", "delete", "approve", "cancel", "refund"],
            ),
            ("payments", &["read", "refund"]),
            ("refunds", &["read", "approve"]),
            ("reviews", &["read", "delete", "respond"]),
            ("reports", &["read", "generate"]),
            ("notifications", &["create", "read", "delete"]),
        ],
    ),
    (
        Role::Owner,
        &[
            ("courts", &["create", "read", "update", "delete"]),
            ("bookings", &["read", "update", "approve", "cancel", "refund"]),
            ("payments", &["read"]),
            ("payouts", &["read", "request"]),
            ("refunds", &["read", "approve"]),
            ("reviews", &["read", "respond"]),
            ("reports", &["read", "generate"]),
            ("notifications", &["read"]),
        ],
    ),
    (
        Role::User,
        &[
            ("courts", &["read"]),
            ("bookings", &["create", "read", "cancel"]),
            ("payments", &["create", "read"]),
            ("refunds", &["request"]),
            ("reviews", &["create", "read", "update", "delete"]),
            ("notifications", &["read"]),
        ],
    ),
];

/// Errors loading a permission table from disk.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read permission file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or a role key that is not a known role.
    #[error("Invalid permission table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only permission table shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTable {
    roles: BTreeMap<Role, ResourceGrants>,
}

impl PermissionTable {
    /// Build a table from `(role, resource, actions)` triples.
    ///
    /// Repeated resources for a role are merged; actions keep first-seen
    /// order with duplicates dropped.
    pub fn from_grants<R, A, I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, R, A)>,
        R: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roles: BTreeMap<Role, ResourceGrants> = BTreeMap::new();

        for (role, resource, actions) in grants {
            let entry = roles
                .entry(role)
                .or_default()
                .entry(resource.into())
                .or_default();
            for action in actions {
                let action = action.into();
                if !entry.contains(&action) {
                    entry.push(action);
                }
            }
        }

        Self { roles }
    }

    /// The platform's built-in table.
    pub fn builtin() -> Self {
        Self::from_grants(BUILTIN_GRANTS.iter().flat_map(|(role, resources)| {
            resources
                .iter()
                .map(move |(resource, actions)| (*role, *resource, actions.iter().copied()))
        }))
    }

    /// Parse a table from JSON of the form `{"role": {"resource": ["action"]}}`.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<Role, BTreeMap<String, Vec<String>>> = serde_json::from_str(json)?;

        Ok(Self::from_grants(raw.into_iter().flat_map(|(role, resources)| {
            resources
                .into_iter()
                .map(move |(resource, actions)| (role, resource, actions))
        })))
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Actions allowed for `role` on `resource`, if the pair is listed.
    pub fn actions(&self, role: Role, resource: &str) -> Option<&[String]> {
        self.roles
            .get(&role)
            .and_then(|resources| resources.get(resource))
            .map(Vec::as_slice)
    }

    /// Everything `role` is granted, if the role is in the table.
    pub fn resources(&self, role: Role) -> Option<&ResourceGrants> {
        self.roles.get(&role)
    }

    /// Whether `action` is listed for `role` on `resource`.
    pub fn contains(&self, role: Role, resource: &str, action: &str) -> bool {
        self.actions(role, resource)
            .is_some_and(|actions| actions.iter().any(|a| a == action))
    }

    /// Roles present in the table.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_contains_every_role() {
        let table = PermissionTable::builtin();
        let roles: Vec<_> = table.roles().collect();
        assert_eq!(roles, Role::all());
    }

    #[test]
    fn test_builtin_owner_has_no_users_resource() {
        let table = PermissionTable::builtin();
        assert!(table.actions(Role::Owner, "users").is_none());
        assert!(table.actions(Role::Admin, "users").is_some());
    }

    #[test]
    fn test_actions_preserve_declared_order() {
        let table = PermissionTable::builtin();
        assert_eq!(
            table.actions(Role::User, "bookings").unwrap(),
            ["create", "read", "cancel"]
        );
    }

    #[test]
    fn test_from_grants_merges_and_dedups() {
        let table = PermissionTable::from_grants([
            (Role::User, "courts", vec!["read", "read"]),
            (Role::User, "courts", vec!["update", "read"]),
        ]);
        assert_eq!(table.actions(Role::User, "courts").unwrap(), ["read", "update"]);
    }

    #[test]
    fn test_contains_is_exact() {
        let table = PermissionTable::builtin();
        assert!(table.contains(Role::Owner, "payouts", "request"));
        assert!(!table.contains(Role::Owner, "payouts", "Request"));
        assert!(!table.contains(Role::Owner, "payout", "request"));
        // `request` is valid for user on refunds, not on payouts
        assert!(!table.contains(Role::User, "payouts", "request"));
    }

    #[test]
    fn test_from_json() {
        let table = PermissionTable::from_json(
            r#"{"owner": {"courts": ["read", "update", "read"]}, "user": {}}"#,
        )
        .unwrap();

        assert_eq!(table.actions(Role::Owner, "courts").unwrap(), ["read", "update"]);
        assert!(table.resources(Role::User).is_none());
        assert!(table.resources(Role::Admin).is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_role() {
        let err = PermissionTable::from_json(r#"{"guest": {"courts": ["read"]}}"#).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(PermissionTable::from_json(r#"{"user": {"courts": "read"}}"#).is_err());
        assert!(PermissionTable::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"admin": {{"roles": ["read"]}}}}"#).unwrap();

        let table = PermissionTable::load(file.path()).unwrap();
        assert!(table.contains(Role::Admin, "roles", "read"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PermissionTable::load(Path::new("/nonexistent/permissions.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let table = PermissionTable::from_grants([(Role::User, "courts", ["read"])]);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            serde_json::json!({ "user": { "courts": ["read"] } })
        );
    }
}
