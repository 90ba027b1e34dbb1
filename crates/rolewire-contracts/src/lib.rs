//! # rolewire-contracts
//!
//! Shared types for the rolewire access-policy compiler.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only the wire-format types the role API persists, the
//! canonical in-process model the UI edits, the sentinel constants both
//! sides compare against, and the error types.

pub mod config;
pub mod error;
pub mod model;
pub mod policy;
pub mod role;
pub mod rule;

pub use error::{RolewireError, RolewireResult};
pub use model::{RoleModel, RuleBuckets};
pub use policy::{
    DocRef, PolicyActions, PolicyConstraint, PolicyEffect, PredicateNode, StoredPolicy,
};
pub use role::{PermissionFlags, RoleSys, StoredRole};
pub use rule::{EntityKind, FieldPath, Rule, RuleAction, RuleId, RuleScope, Selector};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::config;
    use super::policy::{PolicyActions, PolicyConstraint, PolicyEffect, PredicateNode};
    use super::role::StoredRole;
    use super::rule::{EntityKind, FieldPath, Selector};

    // ── PolicyEffect ──────────────────────────────────────────────────────────

    #[test]
    fn effect_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PolicyEffect::Allow).unwrap(), json!("allow"));
        assert_eq!(serde_json::to_value(PolicyEffect::Deny).unwrap(), json!("deny"));
    }

    #[test]
    fn effect_rejects_unknown_values() {
        let result: Result<PolicyEffect, _> = serde_json::from_value(json!("grant"));
        assert!(result.is_err());
    }

    // ── PolicyActions ─────────────────────────────────────────────────────────

    #[test]
    fn actions_all_round_trips_as_literal() {
        let json = serde_json::to_value(&PolicyActions::All).unwrap();
        assert_eq!(json, json!("all"));

        let decoded: PolicyActions = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, PolicyActions::All);
    }

    #[test]
    fn actions_list_round_trips() {
        let original = PolicyActions::Named(vec!["publish".to_string(), "unpublish".to_string()]);
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json, json!(["publish", "unpublish"]));

        let decoded: PolicyActions = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn actions_unknown_literal_is_an_error() {
        let result: Result<PolicyActions, _> = serde_json::from_value(json!("everything"));
        assert!(result.is_err(), "only the literal 'all' is a valid string action set");
    }

    // ── PredicateNode ─────────────────────────────────────────────────────────

    #[test]
    fn equality_node_round_trips() {
        let node = PredicateNode::equality(config::DOC_ENTITY_TYPE, "Entry");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, json!({ "equals": [{ "doc": "sys.type" }, "Entry"] }));

        let decoded: PredicateNode = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(
            decoded.as_equality().map(|(doc, v)| (doc, v.as_str().unwrap())),
            Some(("sys.type", "Entry"))
        );
    }

    #[test]
    fn membership_node_round_trips() {
        let node = PredicateNode::membership(
            config::DOC_TAG_IDS,
            vec!["team-a".to_string(), "team-b".to_string()],
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({ "in": [{ "doc": "metadata.tags.sys.id" }, ["team-a", "team-b"]] })
        );

        let decoded: PredicateNode = serde_json::from_value(json).unwrap();
        let (doc, values) = decoded.as_membership().unwrap();
        assert_eq!(doc, "metadata.tags.sys.id");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn all_membership_variant_parses() {
        let json = json!({ "all": [{ "doc": "metadata.tags.sys.id" }, ["a"]] });
        let decoded: PredicateNode = serde_json::from_value(json).unwrap();
        assert!(decoded.as_membership().is_some());
    }

    #[test]
    fn equality_with_list_literal_is_also_membership() {
        let json = json!({ "equals": [{ "doc": "metadata.tags.sys.id" }, ["a", "b"]] });
        let decoded: PredicateNode = serde_json::from_value(json).unwrap();

        // Both views apply; the extractor's matcher order decides which wins.
        assert!(decoded.as_equality().is_some());
        assert!(decoded.as_membership().is_some());
    }

    #[test]
    fn path_node_round_trips() {
        let node = PredicateNode::path("fields.title.%");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, json!({ "paths": [{ "doc": "fields.title.%" }] }));

        let decoded: PredicateNode = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.as_paths().unwrap().len(), 1);
    }

    #[test]
    fn unknown_shape_survives_round_trip_verbatim() {
        let original = json!({ "or": [{ "equals": [{ "doc": "sys.type" }, "Entry"] }] });
        let decoded: PredicateNode = serde_json::from_value(original.clone()).unwrap();

        match &decoded {
            PredicateNode::Other(value) => assert_eq!(value, &original),
            other => panic!("expected Other, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&decoded).unwrap(), original);
    }

    // ── PolicyConstraint ──────────────────────────────────────────────────────

    #[test]
    fn constraint_both_encodings_expose_same_nodes() {
        let and_form: PolicyConstraint =
            serde_json::from_value(json!({ "and": [{ "equals": [{ "doc": "sys.type" }, "Asset"] }] }))
                .unwrap();
        let flat_form: PolicyConstraint =
            serde_json::from_value(json!([{ "equals": [{ "doc": "sys.type" }, "Asset"] }]))
                .unwrap();

        assert_eq!(and_form.nodes(), flat_form.nodes());
    }

    #[test]
    fn unknown_constraint_shape_exposes_no_nodes() {
        let constraint: PolicyConstraint =
            serde_json::from_value(json!({ "or": [{ "equals": [{ "doc": "sys.type" }, "Entry"] }] }))
                .unwrap();

        assert!(constraint.nodes().is_empty());
        assert_eq!(
            serde_json::to_value(&constraint).unwrap(),
            json!({ "or": [{ "equals": [{ "doc": "sys.type" }, "Entry"] }] })
        );
    }

    #[test]
    fn and_constraint_serializes_as_conjunction() {
        let constraint = PolicyConstraint::And {
            and: vec![PredicateNode::equality(config::DOC_ENTITY_TYPE, "Entry")],
        };
        let json = serde_json::to_value(&constraint).unwrap();
        assert!(json.get("and").is_some(), "expected an 'and' object, got {}", json);
    }

    // ── StoredRole ────────────────────────────────────────────────────────────

    #[test]
    fn role_document_parses_with_optional_fields_absent() {
        let role = StoredRole::from_json_str(
            r#"{ "sys": { "id": "role-1", "version": 3 }, "name": "Editor" }"#,
        )
        .unwrap();

        assert_eq!(role.sys.id, "role-1");
        assert_eq!(role.sys.version, 3);
        assert!(role.description.is_none());
        assert!(role.permissions.is_empty());
        assert!(role.policy_slice().is_empty());
    }

    #[test]
    fn role_document_parse_error_is_malformed_document() {
        let result = StoredRole::from_json_str("{ not json");
        match result {
            Err(super::RolewireError::MalformedDocument { reason }) => {
                assert!(reason.contains("failed to parse role document"));
            }
            other => panic!("expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn null_policies_serialize_as_null() {
        let mut role = StoredRole::from_json_str(
            r#"{ "sys": { "id": "role-1", "version": 1 }, "name": "Editor", "policies": [] }"#,
        )
        .unwrap();
        role.policies = None;

        let json = serde_json::to_value(&role).unwrap();
        assert!(json.get("policies").unwrap().is_null());
    }

    // ── Rule helpers ──────────────────────────────────────────────────────────

    #[test]
    fn entity_kind_wire_names_round_trip() {
        for kind in [EntityKind::Entry, EntityKind::Asset] {
            assert_eq!(EntityKind::from_wire_name(kind.wire_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_wire_name("ContentType"), None);
    }

    #[test]
    fn metadata_tags_path_is_recognized() {
        assert!(FieldPath::metadata_tags().is_metadata_tags());
        assert!(!FieldPath::unconstrained().is_metadata_tags());

        let title = FieldPath {
            field: Selector::only("title"),
            locale: Selector::Wildcard,
        };
        assert!(!title.is_metadata_tags());
    }

    #[test]
    fn selector_concrete_value_access() {
        assert_eq!(Selector::Wildcard.as_only(), None);
        assert_eq!(Selector::only("article").as_only(), Some("article"));
        assert!(Selector::Wildcard.is_wildcard());
    }
}
