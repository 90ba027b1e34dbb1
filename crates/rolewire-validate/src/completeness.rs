//! Completeness checks for canonical rules.
//!
//! A rule is complete when every concrete reference it makes (content
//! type, field, entity id, locale, tag) still resolves against current
//! space data. Wildcard dimensions reference nothing and are always
//! complete. The checks are independent: one rule can lose several
//! references at once, and each failing check contributes one label in a
//! fixed order.

use std::collections::BTreeMap;

use tracing::debug;

use rolewire_contracts::model::RoleModel;
use rolewire_contracts::rule::{EntityKind, Rule, RuleId};

use crate::refs::{ContentTypeRef, FieldRef, LocaleRef};

/// One kind of reference a rule can lose.
///
/// Ordering of the derived labels is fixed: `contentType`, `field`,
/// `entry`/`asset`, `locale`, `tags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReference {
    /// The rule's concrete content type no longer exists.
    ContentType,
    /// The rule's concrete field is gone from its content type.
    Field,
    /// The entry named by the rule's entity id no longer resolves.
    Entry,
    /// The asset named by the rule's entity id no longer resolves.
    Asset,
    /// The rule's concrete locale is gone.
    Locale,
    /// None of the rule's tag ids exist anymore.
    Tags,
}

impl MissingReference {
    /// The attribute label shown for this kind.
    pub fn label(self) -> &'static str {
        match self {
            MissingReference::ContentType => "contentType",
            MissingReference::Field => "field",
            MissingReference::Entry => "entry",
            MissingReference::Asset => "asset",
            MissingReference::Locale => "locale",
            MissingReference::Tags => "tags",
        }
    }
}

impl std::fmt::Display for MissingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Collect, per rule, the references that no longer resolve.
///
/// Rules with nothing missing are omitted. The model is only read; empty
/// reference collections are not an error, they simply make every concrete
/// reference in that category missing, and the caller revalidates once
/// fresher data arrives.
pub fn collect_incomplete_rules(
    model: &RoleModel,
    content_types: &[ContentTypeRef],
    valid_entity_ids: &[String],
    locales: &[LocaleRef],
    tag_ids: &[String],
) -> BTreeMap<RuleId, Vec<MissingReference>> {
    let mut incomplete = BTreeMap::new();

    for rule in model.rules() {
        let missing = missing_references(rule, content_types, valid_entity_ids, locales, tag_ids);
        if !missing.is_empty() {
            incomplete.insert(rule.id.clone(), missing);
        }
    }

    debug!(
        role = %model.id,
        incomplete = incomplete.len(),
        "checked rule completeness"
    );

    incomplete
}

/// Run the five checks for one rule, in their fixed order.
fn missing_references(
    rule: &Rule,
    content_types: &[ContentTypeRef],
    valid_entity_ids: &[String],
    locales: &[LocaleRef],
    tag_ids: &[String],
) -> Vec<MissingReference> {
    let mut missing = Vec::new();

    let content_type = rule.content_type.as_only();
    if let Some(id) = content_type {
        if !content_types.iter().any(|ct| ct.id == id) {
            missing.push(MissingReference::ContentType);
        }
    }

    if let Some(path) = &rule.path {
        // The metadata-tags path constrains tag editing, not a field, so it
        // can never lose one. A concrete field is only checkable when the
        // rule names a content type; a vanished content type resolves to an
        // empty field list and reports its fields missing too.
        if !path.is_metadata_tags() {
            if let (Some(ct_id), Some(field)) = (content_type, path.field.as_only()) {
                let fields = content_types
                    .iter()
                    .find(|ct| ct.id == ct_id)
                    .map(|ct| ct.fields.as_slice())
                    .unwrap_or(&[]);
                if !fields.iter().any(|f| field_matches(f, field)) {
                    missing.push(MissingReference::Field);
                }
            }
        }
    }

    if let Some(entity_id) = &rule.entity_id {
        if !valid_entity_ids.iter().any(|id| id == entity_id) {
            missing.push(match rule.entity {
                EntityKind::Entry => MissingReference::Entry,
                EntityKind::Asset => MissingReference::Asset,
            });
        }
    }

    if let Some(path) = &rule.path {
        if let Some(code) = path.locale.as_only() {
            if !locales.iter().any(|locale| locale.code == code) {
                missing.push(MissingReference::Locale);
            }
        }
    }

    if let Some(ids) = &rule.metadata_tag_ids {
        // Partial overlap survives: only a fully vanished tag list fails.
        if ids.iter().all(|id| !tag_ids.contains(id)) {
            missing.push(MissingReference::Tags);
        }
    }

    missing
}

/// A field matches by internal id first, then by its declared external name.
fn field_matches(field: &FieldRef, wanted: &str) -> bool {
    field.id == wanted || field.api_name.as_deref() == Some(wanted)
}
