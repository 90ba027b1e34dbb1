//! The stored role document.
//!
//! A role is the unit the role-management API reads and writes: identity and
//! version under `sys`, display metadata, an opaque map of permission flags,
//! and the policy array the compiler operates on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RolewireError, RolewireResult};
use crate::policy::StoredPolicy;

/// Opaque permission flags carried on a role document.
///
/// The compiler copies these verbatim between the stored document and the
/// canonical model; their keys and meanings belong to other subsystems.
pub type PermissionFlags = serde_json::Map<String, Value>;

/// System metadata of a role document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSys {
    /// Stable identifier assigned by the API.
    pub id: String,
    /// Optimistic-locking version, echoed back on write.
    pub version: u64,
}

/// A role document as persisted by the role-management API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRole {
    /// Identity and version.
    pub sys: RoleSys,

    /// Human-readable role name.
    pub name: String,

    /// Optional description shown in role listings.
    #[serde(default)]
    pub description: Option<String>,

    /// Opaque permission flags, copied verbatim by the compiler.
    #[serde(default)]
    pub permissions: PermissionFlags,

    /// The persisted policy statements.
    ///
    /// `None` on write means the composer could not reconstruct the array
    /// for a non-compatible model; on read it is treated as empty.
    #[serde(default)]
    pub policies: Option<Vec<StoredPolicy>>,
}

impl StoredRole {
    /// Parse `s` as a JSON role document.
    ///
    /// Returns `RolewireError::MalformedDocument` if the JSON is invalid or
    /// does not match the expected shape. Unrecognized predicate shapes are
    /// not an error here; they parse into their catch-all variant and the
    /// decomposer degrades on them later.
    pub fn from_json_str(s: &str) -> RolewireResult<Self> {
        serde_json::from_str(s).map_err(|e| RolewireError::MalformedDocument {
            reason: format!("failed to parse role document: {}", e),
        })
    }

    /// The policy statements, or an empty slice when the array is null.
    pub fn policy_slice(&self) -> &[StoredPolicy] {
        self.policies.as_deref().unwrap_or(&[])
    }
}
