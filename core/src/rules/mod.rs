//! Diagnostic rules — the rule model, the evaluation engine, persistence,
//! and the bundled default rule set.

pub mod condition;
pub mod defaults;
pub mod engine;
pub mod format;
pub mod store;

pub use condition::{Condition, ConditionValue, Operator};
pub use defaults::default_rules;
pub use engine::{evaluate_condition, evaluate_rule};
pub use format::Rule;
pub use store::{RuleStore, StoreError};
