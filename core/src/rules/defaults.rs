//! The bundled default rule set — KDIGO-style CKD staging thresholds plus
//! a few combined clinical patterns. Seeds a fresh store; deployments edit
//! from there.

use crate::rules::condition::{Condition, ConditionValue, Operator};
use crate::rules::format::Rule;
use crate::visit::Scalar;


/// The default clinical rules, in evaluation order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        simple("egfr", Operator::Lt, 90.0, "CKD Stage 2", "KDIGO guidelines"),
        simple("egfr", Operator::Lt, 60.0, "CKD Stage 3", "Moderate reduction"),
        simple("egfr", Operator::Lt, 30.0, "CKD Stage 4", "Severe reduction"),
        simple("egfr", Operator::Lt, 15.0, "CKD Stage 5 (ESRD)", "Kidney failure"),
        simple("acr", Operator::Gt, 30.0, "Microalbuminuria", "Early kidney damage"),
        simple("acr", Operator::Gt, 300.0, "Nephrotic-range proteinuria", "Severe glomerular disease"),
        Rule::Multi {
            conditions: vec![
                number("blood", "egfr", Operator::Lt, 60.0),
                number("urine", "acr", Operator::Gt, 300.0),
            ],
            suggestion: "Proteinuric CKD".into(),
            reason: "Combined eGFR reduction and albuminuria.".into(),
        },
        Rule::Compound {
            conditions: vec![
                flag("history", "diabetes"),
                number("blood", "egfr", Operator::Lt, 60.0),
                number("urine", "acr", Operator::Gt, 300.0),
                one_of("ultrasound", "echogenicity", &["Mildly increased", "Markedly increased"]),
            ],
            suggestion: "Likely Diabetic Nephropathy".into(),
            reason: "Combines history, labs, USG.".into(),
        },
        Rule::Compound {
            conditions: vec![
                flag("history", "hypertension"),
                number("blood", "egfr", Operator::Lt, 60.0),
                number("urine", "acr", Operator::Lt, 300.0),
                text("ultrasound", "kidneySize", "Decreased"),
                text("ultrasound", "echogenicity", "Mildly increased"),
            ],
            suggestion: "Possible Hypertensive Nephrosclerosis".into(),
            reason: "Classic imaging + lab pattern.".into(),
        },
    ]
}


// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

fn simple(test: &str, operator: Operator, threshold: f64, suggestion: &str, reason: &str) -> Rule {
    Rule::Simple {
        test: test.into(),
        operator,
        threshold,
        suggestion: suggestion.into(),
        reason: reason.into(),
    }
}

fn number(section: &str, field: &str, operator: Operator, value: f64) -> Condition {
    Condition {
        section: section.into(),
        field: field.into(),
        operator,
        value: ConditionValue::One(Scalar::Number(value)),
    }
}

fn flag(section: &str, field: &str) -> Condition {
    Condition {
        section: section.into(),
        field: field.into(),
        operator: Operator::Eq,
        value: ConditionValue::One(Scalar::Bool(true)),
    }
}

fn text(section: &str, field: &str, value: &str) -> Condition {
    Condition {
        section: section.into(),
        field: field.into(),
        operator: Operator::Eq,
        value: ConditionValue::One(Scalar::Text(value.into())),
    }
}

fn one_of(section: &str, field: &str, values: &[&str]) -> Condition {
    Condition {
        section: section.into(),
        field: field.into(),
        operator: Operator::In,
        value: ConditionValue::Many(
            values.iter().map(|v| Scalar::Text((*v).into())).collect(),
        ),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::engine::evaluate_rule;
    use crate::visit::VisitRecord;

    #[test]
    fn seed_has_nine_rules_in_staging_order() {
        let rules = default_rules();
        assert_eq!(rules.len(), 9);
        assert_eq!(rules[0].suggestion(), "CKD Stage 2");
        assert_eq!(rules[3].suggestion(), "CKD Stage 5 (ESRD)");
        assert_eq!(rules[6].kind(), "multi");
        assert_eq!(rules[8].suggestion(), "Possible Hypertensive Nephrosclerosis");
    }

    #[test]
    fn diabetic_nephropathy_pattern_fires_on_the_full_picture() {
        let rules = default_rules();
        let diabetic = &rules[7];

        let visit = VisitRecord::new()
            .with_field("history", "diabetes", true)
            .with_field("blood", "egfr", 45.0)
            .with_field("urine", "acr", 350.0)
            .with_field("ultrasound", "echogenicity", "Markedly increased");
        assert!(evaluate_rule(diabetic, &visit));

        // Without the imaging finding the pattern is incomplete.
        let no_usg = VisitRecord::new()
            .with_field("history", "diabetes", true)
            .with_field("blood", "egfr", 45.0)
            .with_field("urine", "acr", 350.0);
        assert!(!evaluate_rule(diabetic, &no_usg));
    }

    #[test]
    fn hypertensive_pattern_needs_acr_below_nephrotic_range() {
        let rules = default_rules();
        let hypertensive = &rules[8];

        let visit = VisitRecord::new()
            .with_field("history", "hypertension", true)
            .with_field("blood", "egfr", 50.0)
            .with_field("urine", "acr", 120.0)
            .with_field("ultrasound", "kidneySize", "Decreased")
            .with_field("ultrasound", "echogenicity", "Mildly increased");
        assert!(evaluate_rule(hypertensive, &visit));

        let nephrotic = VisitRecord::new()
            .with_field("history", "hypertension", true)
            .with_field("blood", "egfr", 50.0)
            .with_field("urine", "acr", 400.0)
            .with_field("ultrasound", "kidneySize", "Decreased")
            .with_field("ultrasound", "echogenicity", "Mildly increased");
        assert!(!evaluate_rule(hypertensive, &nephrotic));
    }
}
