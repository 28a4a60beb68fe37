//! VTX CLI — evaluate clinical visit records against the active rule set.
//!
//! # Usage
//!
//! ```text
//! vtx evaluate visit.json
//! vtx rules list
//! vtx rules add '{"type":"simple","test":"egfr","operator":"<","threshold":90,...}'
//! vtx rules delete 3
//! vtx rules reset
//! ```

mod args;

use std::path::PathBuf;
use std::process;

use args::Command;
use visit_triage_core::report::generate_report;
use visit_triage_core::rules::{Rule, RuleStore};
use visit_triage_core::visit::load_visit;


fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = argv[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match args::parse_args(&arg_refs) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("vtx: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cmd) {
        eprintln!("vtx: {}", e);
        process::exit(1);
    }
}

fn run(cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Evaluate { visit_path, rules_path } => {
            let store = open_store(rules_path)?;
            let visit = load_visit(&visit_path).map_err(|e| e.to_string())?;
            println!("{}", generate_report(store.rules(), &visit));
            Ok(())
        }
        Command::RulesList { rules_path } => {
            let store = open_store(rules_path)?;
            for (index, rule) in store.rules().iter().enumerate() {
                println!("{:>2}. [{}] {}", index, rule.kind(), describe(rule));
            }
            Ok(())
        }
        Command::RulesAdd { json, rules_path } => {
            let rule: Rule = serde_json::from_str(&json)
                .map_err(|e| format!("invalid rule JSON: {}", e))?;
            let suggestion = rule.suggestion().to_string();
            let mut store = open_store(rules_path)?;
            store.add_rule(rule).map_err(|e| e.to_string())?;
            println!("added rule {}: {}", store.len() - 1, suggestion);
            Ok(())
        }
        Command::RulesDelete { index, rules_path } => {
            let mut store = open_store(rules_path)?;
            let removed = store.delete_rule(index).map_err(|e| e.to_string())?;
            println!("deleted rule {}: {}", index, removed.suggestion());
            Ok(())
        }
        Command::RulesReset { rules_path } => {
            let mut store = open_store(rules_path)?;
            store.reset_to_defaults().map_err(|e| e.to_string())?;
            println!("rule set reset to {} default rules", store.len());
            Ok(())
        }
        Command::Help => {
            println!("{}", args::USAGE);
            Ok(())
        }
    }
}

fn open_store(override_path: Option<PathBuf>) -> Result<RuleStore, String> {
    let path = override_path.unwrap_or_else(default_rules_path);
    RuleStore::load(&path).map_err(|e| {
        format!("{} (run 'vtx rules reset' to restore the defaults)", e)
    })
}

fn default_rules_path() -> PathBuf {
    if let Ok(dir) = std::env::var("VTX_CONFIG_DIR") {
        return PathBuf::from(dir).join("rules.json");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
        .join(".config")
        .join("visit-triage")
        .join("rules.json")
}

/// One-line summary of a rule for listings.
fn describe(rule: &Rule) -> String {
    match rule {
        Rule::Simple { test, operator, threshold, suggestion, .. } => {
            format!("blood.{} {} {} => {}", test, operator.symbol(), threshold, suggestion)
        }
        Rule::Multi { conditions, suggestion, .. }
        | Rule::Compound { conditions, suggestion, .. } => {
            format!("{} conditions => {}", conditions.len(), suggestion)
        }
    }
}
