//! Reference collections owned by other subsystems.
//!
//! The validator consumes these fully resolved; it never fetches. Each
//! type carries just the attributes completeness checks compare against,
//! deserialized from the owning subsystem's JSON.

use serde::{Deserialize, Serialize};

/// Summary of one content type: its id and field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeRef {
    /// The content type's id, matched against a rule's content-type
    /// selector.
    pub id: String,
    /// The content type's fields.
    #[serde(default)]
    pub fields: Vec<FieldRef>,
}

/// One field of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Internal field id.
    pub id: String,
    /// Externally declared name, when the field exposes one.
    #[serde(default, rename = "apiName")]
    pub api_name: Option<String>,
}

/// A locale descriptor; only the code matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleRef {
    /// The locale code, e.g. `en-US`.
    pub code: String,
}
