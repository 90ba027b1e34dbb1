//! # rolewire-validate
//!
//! Completeness validation for canonical rules.
//!
//! ## Overview
//!
//! Space data moves underneath saved roles: content types get deleted,
//! fields renamed, entries unpublished, locales removed, tags retired. A
//! rule referencing vanished data still round-trips through the compiler;
//! it just can no longer do anything. [`collect_incomplete_rules`] reports,
//! per rule, which reference kinds no longer resolve so the UI can flag
//! them.
//!
//! The function is pure: it reads the model and four caller-resolved
//! reference collections, fetches nothing, and mutates nothing.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rolewire_validate::collect_incomplete_rules;
//!
//! let incomplete = collect_incomplete_rules(
//!     &model,
//!     &content_types,
//!     &valid_entity_ids,
//!     &locales,
//!     &tag_ids,
//! );
//! for (rule_id, missing) in &incomplete {
//!     println!("{}: {:?}", rule_id, missing);
//! }
//! ```

pub mod completeness;
pub mod refs;

pub use completeness::{collect_incomplete_rules, MissingReference};
pub use refs::{ContentTypeRef, FieldRef, LocaleRef};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use rolewire_compiler::decompose;
    use rolewire_compiler::idgen::RuleIdGen;
    use rolewire_contracts::model::RoleModel;
    use rolewire_contracts::role::StoredRole;
    use rolewire_contracts::rule::RuleId;

    use super::completeness::{collect_incomplete_rules, MissingReference};
    use super::refs::{ContentTypeRef, FieldRef, LocaleRef};

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct SeqIds(u32);

    impl RuleIdGen for SeqIds {
        fn next_id(&mut self) -> RuleId {
            self.0 += 1;
            RuleId(format!("rule-{}", self.0))
        }
    }

    /// Decompose a role built around the given policy array.
    fn model_from(policies: serde_json::Value) -> RoleModel {
        let body = json!({
            "sys": { "id": "role-validate", "version": 1 },
            "name": "Localizer",
            "policies": policies
        });
        let role = StoredRole::from_json_str(&body.to_string()).unwrap();
        let model = decompose(&role, &mut SeqIds(0));
        assert!(model.ui_compatible, "test fixtures must stay representable");
        model
    }

    /// A policy with every reference-bearing constraint set.
    fn fully_referencing_policy(
        entity: &str,
        content_type: &str,
        entity_id: &str,
        tag: &str,
        field: &str,
        locale: &str,
    ) -> serde_json::Value {
        json!({
            "effect": "allow",
            "actions": ["update"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, entity] },
                { "equals": [{ "doc": "sys.contentType.sys.id" }, content_type] },
                { "equals": [{ "doc": "sys.id" }, entity_id] },
                { "in": [{ "doc": "metadata.tags.sys.id" }, [tag]] },
                { "paths": [{ "doc": format!("fields.{}.{}", field, locale) }] }
            ] }
        })
    }

    fn space_content_types() -> Vec<ContentTypeRef> {
        vec![
            ContentTypeRef {
                id: "article".to_string(),
                fields: vec![
                    FieldRef { id: "title".to_string(), api_name: None },
                    FieldRef {
                        id: "internalBody".to_string(),
                        api_name: Some("body".to_string()),
                    },
                ],
            },
            ContentTypeRef { id: "landing-page".to_string(), fields: vec![] },
        ]
    }

    fn space_locales() -> Vec<LocaleRef> {
        vec![
            LocaleRef { code: "en-US".to_string() },
            LocaleRef { code: "de-DE".to_string() },
        ]
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // ── 1. Complete rules ─────────────────────────────────────────────────────

    /// A rule whose references all resolve is omitted from the result.
    #[test]
    fn test_complete_rule_reports_nothing() {
        let model = model_from(json!([fully_referencing_policy(
            "Entry", "article", "entry-1", "team-a", "title", "en-US"
        )]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &strings(&["entry-1"]),
            &space_locales(),
            &strings(&["team-a"]),
        );

        assert!(incomplete.is_empty());
    }

    /// Wildcard dimensions reference nothing, so a fully unconstrained rule
    /// is complete even against empty collections.
    #[test]
    fn test_unconstrained_rule_needs_no_references() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": "all",
            "constraint": { "and": [{ "equals": [{ "doc": "sys.type" }, "Entry"] }] }
        }]));

        let incomplete = collect_incomplete_rules(&model, &[], &[], &[], &[]);
        assert!(incomplete.is_empty());
    }

    // ── 2. Missing references and ordering ────────────────────────────────────

    /// A rule that lost every reference reports all five labels in the
    /// fixed order.
    #[test]
    fn test_missing_labels_keep_fixed_order() {
        let model = model_from(json!([fully_referencing_policy(
            "Entry", "gone-ct", "gone-entry", "gone-tag", "gone-field", "xx-XX"
        )]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &strings(&["entry-1"]),
            &space_locales(),
            &strings(&["team-a"]),
        );

        assert_eq!(incomplete.len(), 1);
        let missing = incomplete.values().next().unwrap();
        assert_eq!(
            missing,
            &vec![
                MissingReference::ContentType,
                MissingReference::Field,
                MissingReference::Entry,
                MissingReference::Locale,
                MissingReference::Tags,
            ]
        );
    }

    /// The entity label follows the rule's kind: asset rules report
    /// `asset`, not `entry`.
    #[test]
    fn test_asset_rules_report_asset_label() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["read"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Asset"] },
                { "equals": [{ "doc": "sys.id" }, "asset-gone"] }
            ] }
        }]));

        let incomplete = collect_incomplete_rules(&model, &[], &[], &[], &[]);
        let missing = incomplete.values().next().unwrap();
        assert_eq!(missing, &vec![MissingReference::Asset]);
    }

    /// Each check is independent: losing the locale alone reports only the
    /// locale.
    #[test]
    fn test_single_missing_locale() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["update"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "equals": [{ "doc": "sys.contentType.sys.id" }, "article"] },
                { "paths": [{ "doc": "fields.title.fr-FR" }] }
            ] }
        }]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &[],
            &space_locales(),
            &[],
        );

        let missing = incomplete.values().next().unwrap();
        assert_eq!(missing, &vec![MissingReference::Locale]);
    }

    // ── 3. Field resolution ───────────────────────────────────────────────────

    /// Fields match by internal id first, then by declared external name.
    #[test]
    fn test_field_matches_by_external_name() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["update"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "equals": [{ "doc": "sys.contentType.sys.id" }, "article"] },
                { "paths": [{ "doc": "fields.body.en-US" }] }
            ] }
        }]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &[],
            &space_locales(),
            &[],
        );

        assert!(incomplete.is_empty(), "apiName 'body' should resolve the field");
    }

    /// A field absent from the rule's content type reports `field`.
    #[test]
    fn test_vanished_field_reports_field() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["update"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "equals": [{ "doc": "sys.contentType.sys.id" }, "article"] },
                { "paths": [{ "doc": "fields.subtitle.en-US" }] }
            ] }
        }]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &[],
            &space_locales(),
            &[],
        );

        let missing = incomplete.values().next().unwrap();
        assert_eq!(missing, &vec![MissingReference::Field]);
    }

    /// The metadata-tags path is exempt from the field check even when the
    /// content type has no matching field.
    #[test]
    fn test_metadata_tags_path_never_misses_a_field() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["update"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "equals": [{ "doc": "sys.contentType.sys.id" }, "landing-page"] },
                { "paths": [{ "doc": "metadata.tags" }] }
            ] }
        }]));

        let incomplete = collect_incomplete_rules(
            &model,
            &space_content_types(),
            &[],
            &space_locales(),
            &[],
        );

        assert!(incomplete.is_empty());
    }

    // ── 4. Tag survival ───────────────────────────────────────────────────────

    /// Partial overlap with live tags is not a failure.
    #[test]
    fn test_partial_tag_overlap_survives() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["read"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "in": [{ "doc": "metadata.tags.sys.id" }, ["team-a", "team-gone"]] }
            ] }
        }]));

        let incomplete =
            collect_incomplete_rules(&model, &[], &[], &[], &strings(&["team-a"]));
        assert!(incomplete.is_empty());
    }

    /// A tag list with no surviving member reports `tags`.
    #[test]
    fn test_fully_vanished_tags_report_tags() {
        let model = model_from(json!([{
            "effect": "allow",
            "actions": ["read"],
            "constraint": { "and": [
                { "equals": [{ "doc": "sys.type" }, "Entry"] },
                { "in": [{ "doc": "metadata.tags.sys.id" }, ["gone-a", "gone-b"]] }
            ] }
        }]));

        let incomplete =
            collect_incomplete_rules(&model, &[], &[], &[], &strings(&["team-a"]));
        let missing = incomplete.values().next().unwrap();
        assert_eq!(missing, &vec![MissingReference::Tags]);
    }

    // ── 5. Purity ─────────────────────────────────────────────────────────────

    /// Validation must not alter the model it reads.
    #[test]
    fn test_validation_does_not_mutate_the_model() {
        let model = model_from(json!([fully_referencing_policy(
            "Entry", "gone-ct", "gone-entry", "gone-tag", "gone-field", "xx-XX"
        )]));
        let snapshot = model.clone();

        let _ = collect_incomplete_rules(&model, &[], &[], &[], &[]);

        assert_eq!(model, snapshot);
    }

    /// Labels render as their UI attribute names.
    #[test]
    fn test_missing_reference_labels() {
        assert_eq!(MissingReference::ContentType.label(), "contentType");
        assert_eq!(MissingReference::Field.label(), "field");
        assert_eq!(MissingReference::Entry.label(), "entry");
        assert_eq!(MissingReference::Asset.label(), "asset");
        assert_eq!(MissingReference::Locale.label(), "locale");
        assert_eq!(MissingReference::Tags.label(), "tags");
    }
}
