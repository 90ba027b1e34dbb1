//! Rule-id generation.
//!
//! Rule ids are process-local handles, never persisted. Generation is a
//! capability the caller injects so tests can supply deterministic ids.

use rolewire_contracts::rule::RuleId;

/// A source of fresh rule ids.
pub trait RuleIdGen {
    /// Produce the next id. Every call must return a distinct value for the
    /// lifetime of the generator.
    fn next_id(&mut self) -> RuleId;
}

/// The default generator: random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidRuleIds;

impl RuleIdGen for UuidRuleIds {
    fn next_id(&mut self) -> RuleId {
        RuleId(uuid::Uuid::new_v4().to_string())
    }
}
