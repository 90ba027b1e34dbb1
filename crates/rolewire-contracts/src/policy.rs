//! Stored-policy wire types.
//!
//! These types mirror the shape the role-management API persists: an effect,
//! an action set, and a boolean predicate tree. What the composer emits is
//! sent back to the API unmodified, so serialization must reproduce the wire
//! shape exactly:
//!
//! ```json
//! {
//!   "effect": "allow",
//!   "actions": ["publish", "unpublish"],
//!   "constraint": {
//!     "and": [
//!       { "equals": [{ "doc": "sys.type" }, "Entry"] },
//!       { "equals": [{ "doc": "sys.contentType.sys.id" }, "article"] }
//!     ]
//!   }
//! }
//! ```
//!
//! Predicate shapes the compiler does not recognize deserialize into
//! [`PredicateNode::Other`] and survive a serialization round trip
//! untouched; the compiler degrades on them instead of failing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::config;

/// Whether a policy grants or revokes its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyEffect {
    Allow,
    Deny,
}

/// The action set of a stored policy.
///
/// Persisted either as the literal string `"all"` or as a list of action
/// names. The canonical glued pairs (`publish`/`unpublish`,
/// `archive`/`unarchive`) always persist as two-element lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyActions {
    /// The literal `"all"`: every action.
    All,
    /// An explicit list of action names.
    Named(Vec<String>),
}

impl Serialize for PolicyActions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PolicyActions::All => serializer.serialize_str(config::ACTION_ALL),
            PolicyActions::Named(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PolicyActions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Literal(String),
            Named(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Literal(s) if s == config::ACTION_ALL => Ok(PolicyActions::All),
            Repr::Literal(other) => Err(serde::de::Error::custom(format!(
                "unrecognized action set literal '{}'",
                other
            ))),
            Repr::Named(names) => Ok(PolicyActions::Named(names)),
        }
    }
}

/// A reference to a document path, e.g. `{"doc": "sys.type"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRef {
    /// Dot-separated path into the persisted entity document.
    pub doc: String,
}

impl DocRef {
    /// Construct a reference to `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { doc: path.into() }
    }
}

/// One node of a policy's predicate tree.
///
/// The recognized variants form a closed set; anything else lands in
/// [`PredicateNode::Other`] and marks the owning policy non-compatible when
/// the decomposer finds it left over after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredicateNode {
    /// Equality between a document path and a literal:
    /// `{"equals": [{"doc": ..}, <literal>]}`.
    Equals {
        equals: (DocRef, Value),
    },
    /// Membership of a document path's values in a list:
    /// `{"in": [{"doc": ..}, [<values>]]}`.
    In {
        #[serde(rename = "in")]
        members: (DocRef, Value),
    },
    /// All-of membership variant: `{"all": [{"doc": ..}, [<values>]]}`.
    All {
        all: (DocRef, Value),
    },
    /// A field-path constraint: `{"paths": [{"doc": "fields.%.%"}]}`.
    Paths {
        paths: Vec<DocRef>,
    },
    /// Any shape the compiler does not understand, preserved verbatim.
    Other(Value),
}

impl PredicateNode {
    /// Build an equality node on `path` with the given literal.
    pub fn equality(path: &str, value: impl Into<Value>) -> Self {
        PredicateNode::Equals {
            equals: (DocRef::new(path), value.into()),
        }
    }

    /// Build an `in` membership node on `path` over the given values.
    pub fn membership(path: &str, values: Vec<String>) -> Self {
        PredicateNode::In {
            members: (
                DocRef::new(path),
                Value::Array(values.into_iter().map(Value::String).collect()),
            ),
        }
    }

    /// Build a path node holding a single document path.
    pub fn path(doc: &str) -> Self {
        PredicateNode::Paths {
            paths: vec![DocRef::new(doc)],
        }
    }

    /// View this node as an equality pair `(path, literal)`, if it is one.
    pub fn as_equality(&self) -> Option<(&str, &Value)> {
        match self {
            PredicateNode::Equals { equals: (doc, value) } => Some((doc.doc.as_str(), value)),
            _ => None,
        }
    }

    /// View this node as a membership pair `(path, values)`.
    ///
    /// `in` and `all` nodes qualify when their second element is a list; an
    /// equality node whose literal is a list qualifies as well, and the tag
    /// matchers claim that shape before the creator matcher can see it.
    pub fn as_membership(&self) -> Option<(&str, &[Value])> {
        let (doc, value) = match self {
            PredicateNode::In { members: (doc, value) } => (doc, value),
            PredicateNode::All { all: (doc, value) } => (doc, value),
            PredicateNode::Equals { equals: (doc, value) } => (doc, value),
            _ => return None,
        };
        value.as_array().map(|list| (doc.doc.as_str(), list.as_slice()))
    }

    /// View this node's path list, if it is a path node.
    pub fn as_paths(&self) -> Option<&[DocRef]> {
        match self {
            PredicateNode::Paths { paths } => Some(paths.as_slice()),
            _ => None,
        }
    }
}

/// The constraint of a stored policy.
///
/// The API accepts a bare predicate list or a single `and` conjunction; both
/// are read, and the composer always writes the `and` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyConstraint {
    /// `{"and": [ ... ]}`
    And { and: Vec<PredicateNode> },
    /// A bare predicate list.
    Flat(Vec<PredicateNode>),
    /// Any other top-level shape, preserved verbatim. Exposes no nodes, so
    /// the owning policy degrades instead of erroring.
    Other(Value),
}

impl PolicyConstraint {
    /// The predicate nodes, regardless of encoding.
    pub fn nodes(&self) -> &[PredicateNode] {
        match self {
            PolicyConstraint::And { and } => and.as_slice(),
            PolicyConstraint::Flat(nodes) => nodes.as_slice(),
            PolicyConstraint::Other(_) => &[],
        }
    }
}

/// A single persisted policy statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPolicy {
    /// Whether the actions are granted or revoked.
    pub effect: PolicyEffect,

    /// The action set the effect applies to.
    pub actions: PolicyActions,

    /// The predicate tree narrowing which entities the policy covers.
    ///
    /// Absent constraints are tolerated on read; a policy without an
    /// entity-type predicate cannot be represented and degrades the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<PolicyConstraint>,
}

impl StoredPolicy {
    /// The constraint's predicate nodes, or an empty slice if absent.
    pub fn constraint_nodes(&self) -> &[PredicateNode] {
        self.constraint
            .as_ref()
            .map(PolicyConstraint::nodes)
            .unwrap_or(&[])
    }
}
