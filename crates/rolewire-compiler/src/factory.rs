//! Blank canonical rules.
//!
//! New UI rules and decomposition both start from the same record: wildcard
//! on every dimension, unrestricted scope, no path. The decomposer then
//! narrows whichever dimensions the stored predicates constrain.

use rolewire_contracts::rule::{EntityKind, Rule, RuleAction, RuleScope, Selector};

use crate::idgen::RuleIdGen;

/// Action pre-selected on a freshly authored rule.
const DEFAULT_ACTION: &str = "read";

/// Produce a blank rule for `entity` with a fresh id.
pub fn blank_rule(entity: EntityKind, ids: &mut dyn RuleIdGen) -> Rule {
    Rule {
        id: ids.next_id(),
        entity,
        action: RuleAction::Single(DEFAULT_ACTION.to_string()),
        scope: RuleScope::Any,
        content_type: Selector::Wildcard,
        entity_id: None,
        metadata_tag_ids: None,
        metadata_tag_types: None,
        path: None,
    }
}

#[cfg(test)]
mod tests {
    use rolewire_contracts::rule::{EntityKind, RuleAction, RuleScope, Selector};

    use super::blank_rule;
    use crate::idgen::UuidRuleIds;

    #[test]
    fn blank_rule_is_fully_unconstrained() {
        let mut ids = UuidRuleIds;
        let rule = blank_rule(EntityKind::Asset, &mut ids);

        assert_eq!(rule.entity, EntityKind::Asset);
        assert_eq!(rule.action, RuleAction::Single("read".to_string()));
        assert_eq!(rule.scope, RuleScope::Any);
        assert_eq!(rule.content_type, Selector::Wildcard);
        assert!(rule.entity_id.is_none());
        assert!(rule.metadata_tag_ids.is_none());
        assert!(rule.metadata_tag_types.is_none());
        assert!(rule.path.is_none());
    }

    #[test]
    fn blank_rules_get_distinct_ids() {
        let mut ids = UuidRuleIds;
        let a = blank_rule(EntityKind::Entry, &mut ids);
        let b = blank_rule(EntityKind::Entry, &mut ids);
        assert_ne!(a.id, b.id);
    }
}
