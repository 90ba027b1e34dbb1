//! Canonical model → stored policies.
//!
//! Recomposition is deterministic: buckets are walked in the fixed order
//! `entries.allowed`, `entries.denied`, `assets.allowed`, `assets.denied`,
//! and each rule renders its predicate nodes in the fixed order entity type,
//! content type, scope, path. Rule ids are dropped; they are UI handles,
//! not part of the stored format.
//!
//! Non-compatible models bypass rule rendering entirely: the retained
//! policy text is parsed back and returned unchanged, or a null policy
//! array when it no longer parses. This path never errors.

use tracing::warn;

use rolewire_contracts::config;
use rolewire_contracts::model::RoleModel;
use rolewire_contracts::policy::{
    PolicyActions, PolicyConstraint, PolicyEffect, PredicateNode, StoredPolicy,
};
use rolewire_contracts::role::{RoleSys, StoredRole};
use rolewire_contracts::rule::{FieldPath, Rule, RuleAction, RuleScope, Selector};

/// Compose a stored role document from the canonical model.
pub fn compose(model: &RoleModel) -> StoredRole {
    let policies = if model.ui_compatible {
        Some(compose_buckets(model))
    } else {
        match serde_json::from_str(&model.policy_string) {
            Ok(original) => Some(original),
            Err(e) => {
                warn!(
                    role = %model.id,
                    error = %e,
                    "retained policy text no longer parses; writing a null policy array"
                );
                None
            }
        }
    };

    StoredRole {
        sys: RoleSys {
            id: model.id.clone(),
            version: model.version,
        },
        name: model.name.clone(),
        description: model.description.clone(),
        permissions: model.permissions.clone(),
        policies,
    }
}

fn compose_buckets(model: &RoleModel) -> Vec<StoredPolicy> {
    let mut policies = Vec::new();
    for (rules, effect) in [
        (&model.entries.allowed, PolicyEffect::Allow),
        (&model.entries.denied, PolicyEffect::Deny),
        (&model.assets.allowed, PolicyEffect::Allow),
        (&model.assets.denied, PolicyEffect::Deny),
    ] {
        policies.extend(rules.iter().map(|rule| compose_rule(rule, effect)));
    }
    policies
}

/// Render one rule as a stored policy.
fn compose_rule(rule: &Rule, effect: PolicyEffect) -> StoredPolicy {
    let mut nodes = vec![PredicateNode::equality(
        config::DOC_ENTITY_TYPE,
        rule.entity.wire_name(),
    )];

    if let Selector::Only(id) = &rule.content_type {
        nodes.push(PredicateNode::equality(config::DOC_CONTENT_TYPE, id.as_str()));
    }

    // Tag constraints render whenever their fields are set; the creator and
    // entity-id constraints render only when their scope is in force.
    if let Some(ids) = &rule.metadata_tag_ids {
        nodes.push(PredicateNode::membership(config::DOC_TAG_IDS, ids.clone()));
    }
    if let Some(types) = &rule.metadata_tag_types {
        nodes.push(PredicateNode::membership(config::DOC_TAG_TYPES, types.clone()));
    }

    match rule.scope {
        RuleScope::CurrentUser => {
            nodes.push(PredicateNode::equality(config::DOC_CREATED_BY, config::CURRENT_USER));
        }
        RuleScope::EntityId => {
            if let Some(id) = &rule.entity_id {
                nodes.push(PredicateNode::equality(config::DOC_ENTITY_ID, id.as_str()));
            }
        }
        RuleScope::Any | RuleScope::MetadataTagId | RuleScope::MetadataTagType => {}
    }

    if let Some(path) = &rule.path {
        nodes.push(PredicateNode::path(&render_path(path)));
    }

    StoredPolicy {
        effect,
        actions: expand_action(&rule.action),
        constraint: Some(PolicyConstraint::And { and: nodes }),
    }
}

/// Expand a canonical action back into its stored form.
fn expand_action(action: &RuleAction) -> PolicyActions {
    match action {
        RuleAction::All => PolicyActions::All,
        RuleAction::Publish => PolicyActions::Named(vec![
            config::ACTION_PUBLISH.to_string(),
            config::ACTION_UNPUBLISH.to_string(),
        ]),
        RuleAction::Archive => PolicyActions::Named(vec![
            config::ACTION_ARCHIVE.to_string(),
            config::ACTION_UNARCHIVE.to_string(),
        ]),
        RuleAction::Single(name) => PolicyActions::Named(vec![name.clone()]),
    }
}

/// Render a field path back to its document-path template, restoring the
/// wildcard character for unconstrained segments.
fn render_path(path: &FieldPath) -> String {
    if path.is_metadata_tags() {
        return config::METADATA_TAGS_PATH.to_string();
    }
    let field = path.field.as_only().unwrap_or(config::PATH_WILDCARD);
    let locale = path.locale.as_only().unwrap_or(config::PATH_WILDCARD);
    [config::PATH_FIELDS_PREFIX, field, locale].join(config::PATH_SEPARATOR)
}
