//! Argument parsing for the vtx binary.
//!
//! Hand-rolled parser over the raw argument list: the first token selects
//! the subcommand, flags are consumed positionally afterwards. Every
//! store-touching command accepts `--rules <file>` to override the default
//! rule-store location.

use std::path::PathBuf;


pub const USAGE: &str = "\
Usage:
  vtx evaluate <visit-file> [--rules <file>]
  vtx rules list [--rules <file>]
  vtx rules add <rule-json> [--rules <file>]
  vtx rules delete <index> [--rules <file>]
  vtx rules reset [--rules <file>]
  vtx help

Visit files are .json or .yaml/.yml, mapping sections (blood, urine,
history, ultrasound, ...) to field values. The rule store defaults to
$VTX_CONFIG_DIR/rules.json, falling back to ~/.config/visit-triage/rules.json.";


/// A parsed vtx invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `vtx evaluate <visit-file>` — report suggestions for one visit.
    Evaluate {
        visit_path: PathBuf,
        rules_path: Option<PathBuf>,
    },
    /// `vtx rules list` — numbered listing of the active rule set.
    RulesList { rules_path: Option<PathBuf> },
    /// `vtx rules add <rule-json>` — append a rule given in its JSON form.
    RulesAdd {
        json: String,
        rules_path: Option<PathBuf>,
    },
    /// `vtx rules delete <index>` — remove a rule by zero-based index.
    RulesDelete {
        index: usize,
        rules_path: Option<PathBuf>,
    },
    /// `vtx rules reset` — restore the bundled defaults.
    RulesReset { rules_path: Option<PathBuf> },
    /// `vtx help`
    Help,
}


/// Parse CLI arguments into a typed `Command`.
///
/// `args` excludes the program name: `["evaluate", "visit.json"]`, not
/// `["vtx", "evaluate", "visit.json"]`.
pub fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("no command specified. Run 'vtx help' for usage.".into());
    }

    match args[0] {
        "evaluate" => parse_evaluate(args),
        "rules" => parse_rules(args),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("unknown command: '{}'. Run 'vtx help' for usage.", other)),
    }
}


// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

/// `vtx evaluate <visit-file> [--rules <file>]`
fn parse_evaluate(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: vtx evaluate <visit-file> [--rules <file>]".into());
    }
    let visit_path = PathBuf::from(args[1]);
    let rules_path = parse_rules_flag(&args[2..])?;
    Ok(Command::Evaluate { visit_path, rules_path })
}

/// `vtx rules <list|add|delete|reset> ...`
fn parse_rules(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: vtx rules <list|add|delete|reset>".into());
    }
    match args[1] {
        "list" => {
            let rules_path = parse_rules_flag(&args[2..])?;
            Ok(Command::RulesList { rules_path })
        }
        "add" => {
            if args.len() < 3 {
                return Err("Usage: vtx rules add <rule-json> [--rules <file>]".into());
            }
            let json = args[2].to_string();
            let rules_path = parse_rules_flag(&args[3..])?;
            Ok(Command::RulesAdd { json, rules_path })
        }
        "delete" => {
            if args.len() < 3 {
                return Err("Usage: vtx rules delete <index> [--rules <file>]".into());
            }
            let index: usize = args[2]
                .parse()
                .map_err(|_| format!("invalid rule index: '{}'", args[2]))?;
            let rules_path = parse_rules_flag(&args[3..])?;
            Ok(Command::RulesDelete { index, rules_path })
        }
        "reset" => {
            let rules_path = parse_rules_flag(&args[2..])?;
            Ok(Command::RulesReset { rules_path })
        }
        other => Err(format!("unknown rules subcommand: '{}'", other)),
    }
}

/// Consume an optional trailing `--rules <file>` flag.
fn parse_rules_flag(rest: &[&str]) -> Result<Option<PathBuf>, String> {
    match rest {
        [] => Ok(None),
        ["--rules", path] => Ok(Some(PathBuf::from(*path))),
        ["--rules"] => Err("missing value after '--rules'".into()),
        [other, ..] => Err(format!("unknown argument: '{}'", other)),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
