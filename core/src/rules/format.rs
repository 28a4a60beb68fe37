//! Rule variants — the tagged rule model as stored on disk.
//!
//! # Wire Format
//!
//! Rules serialize as JSON objects with a `"type"` discriminant:
//!
//! ```json
//! {"type": "simple", "test": "egfr", "operator": "<", "threshold": 90,
//!  "suggestion": "CKD Stage 2", "reason": "KDIGO guidelines"}
//! {"type": "multi", "conditions": [...], "suggestion": "...", "reason": "..."}
//! ```
//!
//! The serde `tag = "type"` attribute handles this automatically, and keeps
//! the format compatible with rule sets exported from earlier deployments.

use serde::{Deserialize, Serialize};

use super::condition::{Condition, Operator};


/// A clinical pattern plus the suggestion to surface when it matches.
///
/// `Simple` is shorthand for a single blood-panel threshold. `Multi` and
/// `Compound` both require every condition to hold; the two tags evaluate
/// identically and differ only in the intent they document — `Compound` is
/// used for richer cross-section patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Rule {
    /// Threshold test on one blood-panel field.
    Simple {
        test: String,
        operator: Operator,
        threshold: f64,
        suggestion: String,
        reason: String,
    },
    /// Conjunction of conditions, each possibly from a different section.
    Multi {
        conditions: Vec<Condition>,
        suggestion: String,
        reason: String,
    },
    /// Cross-section clinical pattern; evaluates exactly like `Multi`.
    Compound {
        conditions: Vec<Condition>,
        suggestion: String,
        reason: String,
    },
}

impl Rule {
    /// The suggestion text shown when this rule fires.
    pub fn suggestion(&self) -> &str {
        match self {
            Rule::Simple { suggestion, .. }
            | Rule::Multi { suggestion, .. }
            | Rule::Compound { suggestion, .. } => suggestion,
        }
    }

    /// The justification attached to the suggestion.
    pub fn reason(&self) -> &str {
        match self {
            Rule::Simple { reason, .. }
            | Rule::Multi { reason, .. }
            | Rule::Compound { reason, .. } => reason,
        }
    }

    /// The tag name, as written in the stored form.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Simple { .. } => "simple",
            Rule::Multi { .. } => "multi",
            Rule::Compound { .. } => "compound",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::condition::{ConditionValue, Operator};
    use crate::visit::Scalar;

    #[test]
    fn parses_stored_simple_rule() {
        let rule: Rule = serde_json::from_str(
            r#"{"type": "simple", "test": "egfr", "operator": "<", "threshold": 90,
                "suggestion": "CKD Stage 2", "reason": "KDIGO guidelines"}"#,
        )
        .unwrap();

        match &rule {
            Rule::Simple { test, operator, threshold, .. } => {
                assert_eq!(test, "egfr");
                assert_eq!(*operator, Operator::Lt);
                assert_eq!(*threshold, 90.0);
            }
            other => panic!("expected simple rule, got {:?}", other),
        }
        assert_eq!(rule.suggestion(), "CKD Stage 2");
        assert_eq!(rule.reason(), "KDIGO guidelines");
        assert_eq!(rule.kind(), "simple");
    }

    #[test]
    fn parses_stored_compound_rule_with_membership_list() {
        let rule: Rule = serde_json::from_str(
            r#"{"type": "compound",
                "conditions": [
                  {"section": "history", "field": "diabetes", "operator": "==", "value": true},
                  {"section": "ultrasound", "field": "echogenicity", "operator": "in",
                   "value": ["Mildly increased", "Markedly increased"]}
                ],
                "suggestion": "Likely Diabetic Nephropathy",
                "reason": "Combines history, labs, USG."}"#,
        )
        .unwrap();

        match &rule {
            Rule::Compound { conditions, .. } => {
                assert_eq!(conditions.len(), 2);
                assert_eq!(conditions[0].value, ConditionValue::One(Scalar::Bool(true)));
                assert_eq!(conditions[1].operator, Operator::In);
            }
            other => panic!("expected compound rule, got {:?}", other),
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let rule = Rule::Simple {
            test: "acr".into(),
            operator: Operator::Gt,
            threshold: 30.0,
            suggestion: "Microalbuminuria".into(),
            reason: "Early kidney damage".into(),
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains(r#""type":"simple""#));
        assert!(json.contains(r#""operator":">""#));
    }

    #[test]
    fn unknown_type_tag_is_an_error() {
        let result: Result<Rule, _> = serde_json::from_str(
            r#"{"type": "scored", "suggestion": "x", "reason": "y"}"#,
        );
        assert!(result.is_err());
    }
}
