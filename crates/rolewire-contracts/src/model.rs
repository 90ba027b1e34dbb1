//! The canonical role model.
//!
//! [`RoleModel`] is what the decomposer produces from a stored role and what
//! the composer consumes to rebuild one. It is purely in-process: the UI
//! edits its rule buckets, the completeness validator reads them, and every
//! save discards the model after composing. It has no persisted form of its
//! own.

use crate::role::PermissionFlags;
use crate::rule::Rule;

/// The allowed/denied rule lists for one entity collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBuckets {
    /// Rules whose stored effect is `allow`.
    pub allowed: Vec<Rule>,
    /// Rules whose stored effect is `deny`.
    pub denied: Vec<Rule>,
}

impl RuleBuckets {
    /// Iterate allowed rules first, then denied.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.allowed.iter().chain(self.denied.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty() && self.denied.is_empty()
    }
}

/// The canonical, UI-facing form of a role document.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleModel {
    /// The role's stable id, from `sys.id`.
    pub id: String,
    /// The role's version, from `sys.version`.
    pub version: u64,
    /// Role name, copied verbatim.
    pub name: String,
    /// Role description, copied verbatim.
    pub description: Option<String>,
    /// Opaque permission flags, copied verbatim.
    pub permissions: PermissionFlags,
    /// Rules governing entries.
    pub entries: RuleBuckets,
    /// Rules governing assets.
    pub assets: RuleBuckets,
    /// The original stored-policy array, serialized as JSON.
    ///
    /// Kept as the display fallback and the recomposition source when the
    /// model is not UI-compatible.
    pub policy_string: String,
    /// False iff at least one stored policy could not be decomposed into
    /// exactly one action, one entity collection, and a fully consumed
    /// predicate list.
    pub ui_compatible: bool,
}

impl RoleModel {
    /// Iterate every rule across all four buckets: entries first, assets
    /// second, allowed before denied within each.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.entries.iter().chain(self.assets.iter())
    }

    /// True iff any rule carries a tag-id or tag-type scope.
    ///
    /// Always recomputed from the current rules; the UI affordance this
    /// gates must track edits, so the value is never stored.
    pub fn metadata_tag_rule_exists(&self) -> bool {
        self.rules().any(Rule::has_tag_scope)
    }
}
