//! Diagnosis report generation — collects firing rules and renders the
//! clinician-facing summary text.

use crate::rules::engine::evaluate_rule;
use crate::rules::format::Rule;
use crate::visit::VisitRecord;


/// The report text when no rule fires.
pub const NO_MATCH_TEXT: &str = "No diagnosis suggestions matched.";

/// All rules that fire for this visit, in rule-set order.
pub fn matching_rules<'a>(rules: &'a [Rule], visit: &VisitRecord) -> Vec<&'a Rule> {
    rules.iter().filter(|r| evaluate_rule(r, visit)).collect()
}

/// Render the diagnosis report: one `- <suggestion> (Reason: <reason>)`
/// line per firing rule, newline-joined in rule-set order.
///
/// Callers sharing a mutable rule set across threads should evaluate over a
/// snapshot taken at call start; this function only borrows a stable slice.
pub fn generate_report(rules: &[Rule], visit: &VisitRecord) -> String {
    let matches = matching_rules(rules, visit);
    if matches.is_empty() {
        return NO_MATCH_TEXT.to_string();
    }

    matches
        .iter()
        .map(|r| format!("- {} (Reason: {})", r.suggestion(), r.reason()))
        .collect::<Vec<_>>()
        .join("\n")
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
