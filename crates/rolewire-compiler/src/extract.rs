//! Constraint extraction: recognizing predicate shapes.
//!
//! Each matcher is a pure function over a single [`PredicateNode`]; the
//! [`take_first`] driver removes the first node a matcher claims and hands
//! back the remainder. The decomposer threads that remainder through the
//! matchers in a fixed order (entity type, content type, entity id, tag
//! ids, tag types, creator, field path), so a node that could satisfy two
//! shapes is always claimed by the earlier matcher.
//!
//! A node no matcher claims stays in the remainder, and a non-empty
//! remainder marks the owning policy non-compatible.

use serde_json::Value;

use rolewire_contracts::config;
use rolewire_contracts::policy::PredicateNode;
use rolewire_contracts::rule::{EntityKind, FieldPath, Selector};

/// Remove the first node `matcher` claims from `nodes`.
///
/// Returns the decoded value (or `None` when nothing matched) together with
/// the remaining nodes. The input list is never mutated in place; callers
/// thread the remainder to the next matcher.
pub fn take_first<T>(
    nodes: Vec<PredicateNode>,
    matcher: impl Fn(&PredicateNode) -> Option<T>,
) -> (Option<T>, Vec<PredicateNode>) {
    for (index, node) in nodes.iter().enumerate() {
        if let Some(value) = matcher(node) {
            let mut rest = nodes;
            rest.remove(index);
            return (Some(value), rest);
        }
    }
    (None, nodes)
}

/// Equality on `sys.type` with exactly `"Entry"` or `"Asset"`.
///
/// Every representable policy carries one of these; its absence aborts rule
/// construction entirely.
pub fn match_entity_type(node: &PredicateNode) -> Option<EntityKind> {
    let (doc, value) = node.as_equality()?;
    if doc != config::DOC_ENTITY_TYPE {
        return None;
    }
    EntityKind::from_wire_name(value.as_str()?)
}

/// Equality on `sys.contentType.sys.id` with a string value.
pub fn match_content_type(node: &PredicateNode) -> Option<String> {
    string_equality_on(node, config::DOC_CONTENT_TYPE)
}

/// Equality on `sys.id` with a string value.
pub fn match_entity_id(node: &PredicateNode) -> Option<String> {
    string_equality_on(node, config::DOC_ENTITY_ID)
}

/// Membership on `metadata.tags.sys.id` over string values.
pub fn match_tag_ids(node: &PredicateNode) -> Option<Vec<String>> {
    string_membership_on(node, config::DOC_TAG_IDS)
}

/// Membership on `metadata.tags.sys.tagType` over string values.
pub fn match_tag_types(node: &PredicateNode) -> Option<Vec<String>> {
    string_membership_on(node, config::DOC_TAG_TYPES)
}

/// What a matched creator predicate means for the rule's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorConstraint {
    /// A string creator value: the rule narrows to the acting user.
    CurrentUser,
    /// A non-string creator value; the node is consumed but the rule stays
    /// unrestricted.
    Unscoped,
}

/// Equality on `sys.createdBy.sys.id`.
pub fn match_creator(node: &PredicateNode) -> Option<CreatorConstraint> {
    let (doc, value) = node.as_equality()?;
    if doc != config::DOC_CREATED_BY {
        return None;
    }
    if value.is_string() {
        Some(CreatorConstraint::CurrentUser)
    } else {
        Some(CreatorConstraint::Unscoped)
    }
}

/// A path node holding exactly one document path.
///
/// Either a `fields.<field>.<locale>` template (wildcard segments map to
/// [`Selector::Wildcard`]) or the bare metadata-tags path.
pub fn match_field_path(node: &PredicateNode) -> Option<FieldPath> {
    let paths = node.as_paths()?;
    let [path] = paths else {
        return None;
    };
    let doc = path.doc.as_str();

    if doc == config::METADATA_TAGS_PATH {
        return Some(FieldPath::metadata_tags());
    }

    let segments: Vec<&str> = doc.split(config::PATH_SEPARATOR).collect();
    match segments.as_slice() {
        [prefix, field, locale] if *prefix == config::PATH_FIELDS_PREFIX => Some(FieldPath {
            field: segment_selector(field),
            locale: segment_selector(locale),
        }),
        _ => None,
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn segment_selector(segment: &str) -> Selector {
    if segment == config::PATH_WILDCARD {
        Selector::Wildcard
    } else {
        Selector::only(segment)
    }
}

fn string_equality_on(node: &PredicateNode, path: &str) -> Option<String> {
    let (doc, value) = node.as_equality()?;
    if doc != path {
        return None;
    }
    value.as_str().map(str::to_string)
}

/// Membership where every element is a string; a non-string element leaves
/// the node unclaimed (and therefore left over).
fn string_membership_on(node: &PredicateNode, path: &str) -> Option<Vec<String>> {
    let (doc, values) = node.as_membership()?;
    if doc != path {
        return None;
    }
    values
        .iter()
        .map(|value: &Value| value.as_str().map(str::to_string))
        .collect()
}
