//! Rule evaluation — decides whether conditions and rules hold for a visit.
//!
//! Everything here is pure and fail-closed: missing sections, missing
//! fields, null values, unparseable numbers, and operator/value-arity
//! mismatches all evaluate to "not met". A malformed rule can suppress its
//! own suggestion, but it can never raise and never block reporting.

use crate::rules::condition::{Condition, ConditionValue, Operator};
use crate::rules::format::Rule;
use crate::visit::{Scalar, VisitRecord};


// ---------------------------------------------------------------------------
// Condition evaluation
// ---------------------------------------------------------------------------

/// Evaluate one condition against a visit record.
pub fn evaluate_condition(cond: &Condition, visit: &VisitRecord) -> bool {
    let value = match visit.value(&cond.section, &cond.field) {
        None | Some(Scalar::Null) => return false,
        Some(v) => v,
    };

    match (cond.operator, &cond.value) {
        (Operator::Lt, ConditionValue::One(rhs)) => match (numeric(value), numeric(rhs)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        (Operator::Gt, ConditionValue::One(rhs)) => match (numeric(value), numeric(rhs)) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        (Operator::Eq, ConditionValue::One(rhs)) => loose_eq(value, rhs),
        (Operator::In, ConditionValue::Many(set)) => set.contains(value),
        // `in` against a single scalar, or a comparison against a list.
        _ => false,
    }
}

/// Best-effort numeric read with prefix parsing: `"12.5 mg/dL"` reads as
/// 12.5, `"abc"`, booleans, and nulls read as nothing.
fn numeric(value: &Scalar) -> Option<f64> {
    match value {
        Scalar::Number(n) => Some(*n),
        Scalar::Text(s) => parse_float_prefix(s),
        Scalar::Bool(_) | Scalar::Null => None,
    }
}

/// Parse the longest leading float prefix of `s`: optional sign, digits
/// with at most one decimal point, optional exponent.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return None;
    }

    // Optional exponent; only consumed when it has digits of its own.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let mut exp_digits = false;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            exp_digits = true;
        }
        if exp_digits {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Loose equality for `==` conditions.
///
/// Same-variant values compare directly. A number against a string converts
/// the whole string (empty/whitespace counts as 0, trailing garbage as no
/// number). A boolean converts to 0/1 first. Null loosely equals only null.
fn loose_eq(a: &Scalar, b: &Scalar) -> bool {
    use Scalar::*;
    match (a, b) {
        (Null, Null) => true,
        (Bool(x), Bool(y)) => x == y,
        (Number(x), Number(y)) => x == y,
        (Text(x), Text(y)) => x == y,
        (Bool(x), other) => loose_eq(&Number(if *x { 1.0 } else { 0.0 }), other),
        (other, Bool(y)) => loose_eq(other, &Number(if *y { 1.0 } else { 0.0 })),
        (Number(x), Text(s)) | (Text(s), Number(x)) => match full_number(s) {
            Some(n) => *x == n,
            None => false,
        },
        (Null, _) | (_, Null) => false,
    }
}

/// Whole-string numeric conversion: trims, treats the empty string as 0,
/// rejects trailing garbage.
fn full_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok()
}


// ---------------------------------------------------------------------------
// Rule evaluation
// ---------------------------------------------------------------------------

/// Evaluate one rule against a visit record.
///
/// `Simple` desugars to a single condition on the blood panel. `Multi` and
/// `Compound` require every condition to hold, checked in list order with
/// an empty list vacuously true.
pub fn evaluate_rule(rule: &Rule, visit: &VisitRecord) -> bool {
    match rule {
        Rule::Simple { test, operator, threshold, .. } => {
            let cond = Condition {
                section: "blood".into(),
                field: test.clone(),
                operator: *operator,
                value: ConditionValue::One(Scalar::Number(*threshold)),
            };
            evaluate_condition(&cond, visit)
        }
        Rule::Multi { conditions, .. } | Rule::Compound { conditions, .. } => {
            conditions.iter().all(|c| evaluate_condition(c, visit))
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
