//! Canonical rule types.
//!
//! A [`Rule`] is the UI-editable form of one stored policy: entity kind,
//! action, audience scope, and optional content-type and field-path
//! narrowing. Rules exist only in process: they are created by the
//! decomposer (or the blank-rule factory), edited by the authoring UI, and
//! consumed by the composer. Nothing here carries a serde surface.
//!
//! "No constraint" is expressed with [`Selector::Wildcard`] rather than a
//! magic string, so every "is this constrained?" check is exhaustive.

use std::fmt;

/// Process-local handle for one rule.
///
/// Generated when the rule is created and used only to address the rule in
/// the UI and in validation results; never derived from, or written to, the
/// stored policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub String);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of entity a rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Entry,
    Asset,
}

impl EntityKind {
    /// The discriminator value persisted under `sys.type`.
    pub fn wire_name(self) -> &'static str {
        match self {
            EntityKind::Entry => "Entry",
            EntityKind::Asset => "Asset",
        }
    }

    /// Parse a `sys.type` discriminator. Anything but the two known kinds
    /// is unrepresentable.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "Entry" => Some(EntityKind::Entry),
            "Asset" => Some(EntityKind::Asset),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The canonical action of a rule.
///
/// The glued pairs persist as two-element lists but are authored and
/// displayed as one logical action, so the canonical form keeps them as
/// single variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Every action (`"all"` on the wire).
    All,
    /// The glued `publish` + `unpublish` pair.
    Publish,
    /// The glued `archive` + `unarchive` pair.
    Archive,
    /// A single non-glued action, e.g. `read`, `create`, `update`, `delete`.
    Single(String),
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::All => f.write_str("all"),
            RuleAction::Publish => f.write_str("publish/unpublish"),
            RuleAction::Archive => f.write_str("archive/unarchive"),
            RuleAction::Single(name) => f.write_str(name),
        }
    }
}

/// The audience restriction of a rule.
///
/// The data backing the narrowing scopes lives in the rule's own fields
/// (`entity_id`, `metadata_tag_ids`, `metadata_tag_types`); the scope
/// records which restriction is in force. The fields can outlive a scope
/// change; the composer consults the scope before rendering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// No restriction.
    Any,
    /// Only entities created by the acting user.
    CurrentUser,
    /// Only the entity named by the rule's `entity_id`.
    EntityId,
    /// Only entities carrying one of the rule's `metadata_tag_ids`.
    MetadataTagId,
    /// Only entities carrying a tag of one of the rule's
    /// `metadata_tag_types`.
    MetadataTagType,
}

/// Either "anything" or one concrete value.
///
/// Used for the content-type, field, and locale dimensions of a rule, where
/// the wildcard means the dimension is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// No constraint on this dimension.
    Wildcard,
    /// Constrained to exactly this value.
    Only(String),
}

impl Selector {
    /// Construct a concrete selector.
    pub fn only(value: impl Into<String>) -> Self {
        Selector::Only(value.into())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Selector::Wildcard)
    }

    /// The concrete value, if any.
    pub fn as_only(&self) -> Option<&str> {
        match self {
            Selector::Wildcard => None,
            Selector::Only(value) => Some(value.as_str()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => f.write_str("*"),
            Selector::Only(value) => f.write_str(value),
        }
    }
}

/// The field/locale slice a rule is narrowed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    /// The constrained field, or wildcard for every field.
    pub field: Selector,
    /// The constrained locale, or wildcard for every locale.
    pub locale: Selector,
}

impl FieldPath {
    /// A path constraining nothing: every field, every locale.
    pub fn unconstrained() -> Self {
        Self {
            field: Selector::Wildcard,
            locale: Selector::Wildcard,
        }
    }

    /// The metadata-tags path, which constrains tag editing rather than a
    /// field slice.
    pub fn metadata_tags() -> Self {
        Self {
            field: Selector::only(crate::config::METADATA_TAGS_PATH),
            locale: Selector::Wildcard,
        }
    }

    /// True if this is the metadata-tags path.
    pub fn is_metadata_tags(&self) -> bool {
        self.field.as_only() == Some(crate::config::METADATA_TAGS_PATH)
    }
}

/// One canonical rule: the UI-editable form of a stored policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Process-local handle; never persisted.
    pub id: RuleId,
    /// Whether the rule governs entries or assets.
    pub entity: EntityKind,
    /// The canonical action.
    pub action: RuleAction,
    /// The audience restriction in force.
    pub scope: RuleScope,
    /// Content-type narrowing; wildcard means any content type.
    ///
    /// Asset rules may carry a concrete content type; the stored format
    /// permits it, so decomposition preserves it.
    pub content_type: Selector,
    /// The entity id backing [`RuleScope::EntityId`].
    pub entity_id: Option<String>,
    /// The tag ids backing [`RuleScope::MetadataTagId`].
    pub metadata_tag_ids: Option<Vec<String>>,
    /// The tag types backing [`RuleScope::MetadataTagType`].
    pub metadata_tag_types: Option<Vec<String>>,
    /// Field/locale narrowing; `None` means the rule covers whole entities.
    pub path: Option<FieldPath>,
}

impl Rule {
    /// True if this rule's scope is a metadata-tag scope.
    pub fn has_tag_scope(&self) -> bool {
        matches!(
            self.scope,
            RuleScope::MetadataTagId | RuleScope::MetadataTagType
        )
    }
}
