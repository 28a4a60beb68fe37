//! Condition — an atomic test against one field of one visit section.

use serde::{Deserialize, Serialize};

use crate::visit::Scalar;


// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Comparison operators supported in conditions.
///
/// Serde names are the symbol spellings used in stored rule documents, so
/// `{"operator": "<"}` round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `<` — numeric strictly-less-than.
    #[serde(rename = "<")]
    Lt,
    /// `>` — numeric strictly-greater-than.
    #[serde(rename = ">")]
    Gt,
    /// `==` — loose equality: numeric strings equal their numbers, booleans
    /// equal 0/1.
    #[serde(rename = "==")]
    Eq,
    /// `in` — exact membership in a value list, no coercion.
    #[serde(rename = "in")]
    In,
}

impl Operator {
    /// The symbol form, as written in stored rules and listings.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "==",
            Operator::In => "in",
        }
    }
}


// ---------------------------------------------------------------------------
// ConditionValue
// ---------------------------------------------------------------------------

/// The right-hand side of a condition: a single scalar for `<` / `>` / `==`,
/// a list for `in`.
///
/// The pairing is a data invariant, not a type-level one; a condition whose
/// operator and value arity disagree simply never matches (see the engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    One(Scalar),
    Many(Vec<Scalar>),
}


// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// An atomic test: `section.field <operator> value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub section: String,
    pub field: String,
    pub operator: Operator,
    pub value: ConditionValue,
}
