//! Built-in sample data for the demo CLI.
//!
//! All data in this module is hardcoded and fictional. It stands in for the
//! role-management API and the space's content model so every subcommand
//! works without any files: a "Regional editor" role with a spread of
//! policies, and the space data to validate it against. One content type
//! the role references ("promotion") has been deleted from the space data
//! on purpose, so `demo check` has something to report.

use serde::Deserialize;
use serde_json::json;

use rolewire_contracts::error::{RolewireError, RolewireResult};
use rolewire_contracts::role::StoredRole;
use rolewire_validate::{ContentTypeRef, LocaleRef};

/// The reference collections the completeness validator consumes.
///
/// `demo check --space <file>` deserializes this shape from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceData {
    /// Content types currently defined in the space.
    #[serde(default, rename = "contentTypes")]
    pub content_types: Vec<ContentTypeRef>,
    /// Ids of entries and assets that still resolve.
    #[serde(default, rename = "entityIds")]
    pub entity_ids: Vec<String>,
    /// Locales enabled in the space.
    #[serde(default)]
    pub locales: Vec<LocaleRef>,
    /// Metadata tag ids that still exist.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Vec<String>,
}

/// A role exercising every predicate shape the compiler recognizes.
pub fn sample_role() -> RolewireResult<StoredRole> {
    let body = json!({
        "sys": { "id": "role-regional-editor", "version": 12 },
        "name": "Regional editor",
        "description": "Edits German article content and manages team-tagged entries",
        "permissions": { "contentDelivery": [], "contentModel": ["read"] },
        "policies": [
            {
                "effect": "allow",
                "actions": ["read"],
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Entry"] }
                ] }
            },
            {
                "effect": "allow",
                "actions": ["update"],
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Entry"] },
                    { "equals": [{ "doc": "sys.contentType.sys.id" }, "article"] },
                    { "paths": [{ "doc": "fields.%.de-DE" }] }
                ] }
            },
            {
                "effect": "allow",
                "actions": ["publish", "unpublish"],
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Entry"] },
                    { "in": [{ "doc": "metadata.tags.sys.id" }, ["team-berlin", "team-munich"]] }
                ] }
            },
            {
                "effect": "allow",
                "actions": ["update"],
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Entry"] },
                    { "equals": [{ "doc": "sys.contentType.sys.id" }, "promotion"] },
                    { "equals": [{ "doc": "sys.createdBy.sys.id" }, "User.current()"] }
                ] }
            },
            {
                "effect": "allow",
                "actions": "all",
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Asset"] },
                    { "equals": [{ "doc": "sys.createdBy.sys.id" }, "User.current()"] }
                ] }
            },
            {
                "effect": "deny",
                "actions": ["archive", "unarchive"],
                "constraint": { "and": [
                    { "equals": [{ "doc": "sys.type" }, "Entry"] },
                    { "equals": [{ "doc": "sys.id" }, "entry-homepage"] }
                ] }
            }
        ]
    });

    StoredRole::from_json_str(&body.to_string())
}

/// Space data matching most, but not all, of what the sample role references.
///
/// The "promotion" content type is gone, as is one of the two team tags;
/// the tag rule survives on partial overlap, the promotion rule does not.
pub fn sample_space() -> RolewireResult<SpaceData> {
    let body = json!({
        "contentTypes": [
            {
                "id": "article",
                "fields": [
                    { "id": "title" },
                    { "id": "internalBody", "apiName": "body" },
                    { "id": "heroImage" }
                ]
            },
            { "id": "landing-page", "fields": [{ "id": "slug" }] }
        ],
        "entityIds": ["entry-homepage", "entry-pricing", "asset-logo"],
        "locales": [
            { "code": "en-US" },
            { "code": "de-DE" }
        ],
        "tagIds": ["team-berlin"]
    });

    serde_json::from_value(body).map_err(|e| RolewireError::MalformedDocument {
        reason: format!("failed to parse space data: {}", e),
    })
}
