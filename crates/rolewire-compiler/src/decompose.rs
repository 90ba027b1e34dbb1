//! Stored policies → canonical model.
//!
//! Decomposition is best-effort: every policy that canonicalizes into
//! exactly one action, one entity collection, and a fully consumed predicate
//! list contributes a rule; every policy that does not flips the model's
//! `ui_compatible` flag and is skipped, while the rest still decompose. The
//! original policy array is retained, serialized, as the fallback for
//! display and recomposition.

use tracing::{debug, warn};

use rolewire_contracts::config;
use rolewire_contracts::model::{RoleModel, RuleBuckets};
use rolewire_contracts::policy::{PolicyActions, PolicyEffect, StoredPolicy};
use rolewire_contracts::role::StoredRole;
use rolewire_contracts::rule::{EntityKind, Rule, RuleAction, RuleScope, Selector};

use crate::extract::{
    match_content_type, match_creator, match_entity_id, match_entity_type, match_field_path,
    match_tag_ids, match_tag_types, take_first, CreatorConstraint,
};
use crate::factory::blank_rule;
use crate::idgen::RuleIdGen;

/// Decompose a stored role document into the canonical model.
///
/// Never fails: policies the compiler cannot represent degrade the model to
/// non-compatible instead of erroring, and the remaining policies are still
/// decomposed.
pub fn decompose(role: &StoredRole, ids: &mut dyn RuleIdGen) -> RoleModel {
    let policies = role.policy_slice();

    let mut model = RoleModel {
        id: role.sys.id.clone(),
        version: role.sys.version,
        name: role.name.clone(),
        description: role.description.clone(),
        permissions: role.permissions.clone(),
        entries: RuleBuckets::default(),
        assets: RuleBuckets::default(),
        // Serializing already-parsed policies cannot fail; the empty-string
        // fallback keeps this path free of panics regardless.
        policy_string: serde_json::to_string(policies).unwrap_or_default(),
        ui_compatible: true,
    };

    for policy in policies {
        let Some(rule) = decompose_policy(policy, ids) else {
            warn!(
                role = %model.id,
                effect = ?policy.effect,
                "policy cannot be represented as a rule; marking model non-compatible"
            );
            model.ui_compatible = false;
            continue;
        };

        let buckets = match rule.entity {
            EntityKind::Entry => &mut model.entries,
            EntityKind::Asset => &mut model.assets,
        };
        match policy.effect {
            PolicyEffect::Allow => buckets.allowed.push(rule),
            PolicyEffect::Deny => buckets.denied.push(rule),
        }
    }

    debug!(
        role = %model.id,
        entry_rules = model.entries.allowed.len() + model.entries.denied.len(),
        asset_rules = model.assets.allowed.len() + model.assets.denied.len(),
        ui_compatible = model.ui_compatible,
        "decomposed role policies"
    );

    model
}

/// Decompose one policy into a rule, or `None` if it is unrepresentable.
///
/// The extractor pipeline runs in its fixed precedence order; whatever it
/// leaves behind is a predicate the compiler does not understand, so a
/// non-empty remainder rejects the policy.
fn decompose_policy(policy: &StoredPolicy, ids: &mut dyn RuleIdGen) -> Option<Rule> {
    let action = canonical_action(&policy.actions)?;
    let nodes = policy.constraint_nodes().to_vec();

    let (entity, rest) = take_first(nodes, match_entity_type);
    // A policy with no recognizable entity type cannot be represented.
    let entity = entity?;

    let mut rule = blank_rule(entity, ids);
    rule.action = action;

    let (content_type, rest) = take_first(rest, match_content_type);
    if let Some(id) = content_type {
        rule.content_type = Selector::Only(id);
    }

    let (entity_id, rest) = take_first(rest, match_entity_id);
    if let Some(id) = entity_id {
        rule.entity_id = Some(id);
        rule.scope = RuleScope::EntityId;
    }

    let (tags, rest) = take_first(rest, match_tag_ids);
    if let Some(tag_ids) = tags {
        rule.metadata_tag_ids = Some(tag_ids);
        rule.scope = RuleScope::MetadataTagId;
    }

    let (tag_types, rest) = take_first(rest, match_tag_types);
    if let Some(types) = tag_types {
        rule.metadata_tag_types = Some(types);
        rule.scope = RuleScope::MetadataTagType;
    }

    let (creator, rest) = take_first(rest, match_creator);
    if creator == Some(CreatorConstraint::CurrentUser) {
        rule.scope = RuleScope::CurrentUser;
    }

    let (path, rest) = take_first(rest, match_field_path);
    rule.path = path;

    if !rest.is_empty() {
        return None;
    }
    Some(rule)
}

/// Canonicalize a stored action set.
///
/// `"all"` stays `All`; a single non-glued action passes through; the two
/// glued pairs collapse to their canonical form regardless of element
/// order. Everything else, including a lone half of a glued pair, has no
/// canonical action and rejects the policy.
fn canonical_action(actions: &PolicyActions) -> Option<RuleAction> {
    match actions {
        PolicyActions::All => Some(RuleAction::All),
        PolicyActions::Named(names) => match names.as_slice() {
            [single] if !config::GLUED_ACTIONS.contains(&single.as_str()) => {
                Some(RuleAction::Single(single.clone()))
            }
            [a, b] if is_pair(a, b, config::ACTION_PUBLISH, config::ACTION_UNPUBLISH) => {
                Some(RuleAction::Publish)
            }
            [a, b] if is_pair(a, b, config::ACTION_ARCHIVE, config::ACTION_UNARCHIVE) => {
                Some(RuleAction::Archive)
            }
            _ => None,
        },
    }
}

/// Order-independent pair match.
fn is_pair(a: &str, b: &str, x: &str, y: &str) -> bool {
    (a == x && b == y) || (a == y && b == x)
}
