//! # rolewire-compiler
//!
//! The two-way compiler between stored role policies and the canonical rule
//! model.
//!
//! ## Overview
//!
//! [`decompose`] reads a stored role document and builds a [`RoleModel`]:
//! each policy's action set is canonicalized, its predicate list is run
//! through the ordered matcher pipeline in [`extract`], and the resulting
//! rule lands in an entries/assets × allowed/denied bucket. [`compose`] is
//! the inverse and regenerates the policy array deterministically.
//!
//! Neither direction ever fails. A policy the compiler cannot represent
//! marks the model non-compatible and is carried through as retained policy
//! text instead.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rolewire_compiler::{compose, decompose, UuidRuleIds};
//! use rolewire_contracts::StoredRole;
//!
//! let role = StoredRole::from_json_str(&body)?;
//! let mut ids = UuidRuleIds;
//! let model = decompose(&role, &mut ids);
//! // ... UI edits model.entries / model.assets ...
//! let outgoing = compose(&model);
//! ```
//!
//! [`RoleModel`]: rolewire_contracts::RoleModel

pub mod compose;
pub mod decompose;
pub mod extract;
pub mod factory;
pub mod idgen;

pub use compose::compose;
pub use decompose::decompose;
pub use factory::blank_rule;
pub use idgen::{RuleIdGen, UuidRuleIds};

// ── Tests ─────────────────────────────────────────────────────────────────────
