//! Rule persistence — load, save, and manage the active rule set.
//!
//! The rule set lives as a JSON array in a `rules.json` file. The first
//! load of a fresh config directory seeds the file from the bundled
//! defaults and persists them immediately, so what the clinician sees is
//! always what is on disk. Every mutation persists before returning.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rules::defaults::default_rules;
use crate::rules::format::Rule;


// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from rule-set persistence and management.
#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    /// The stored document is not a valid rule array. The file is left
    /// untouched — stored rules may be clinician-authored.
    ParseError { path: PathBuf, message: String },
    /// A delete referenced a rule index that does not exist.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "I/O error: {}", e),
            StoreError::ParseError { path, message } => {
                write!(f, "invalid rule store '{}': {}", path.display(), message)
            }
            StoreError::IndexOutOfRange { index, len } => {
                write!(f, "no rule at index {} (rule set has {})", index, len)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IoError(e)
    }
}


// ---------------------------------------------------------------------------
// RuleStore
// ---------------------------------------------------------------------------

/// The owned, ordered rule set plus its backing file.
///
/// Evaluation borrows `rules()`; only the explicit mutators here change the
/// set, and each one persists before returning.
#[derive(Debug)]
pub struct RuleStore {
    path: PathBuf,
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Load the rule set from `path`, seeding the file with the default
    /// rules when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            let store = RuleStore {
                path: path.to_path_buf(),
                rules: default_rules(),
            };
            store.save()?;
            return Ok(store);
        }

        let content = fs::read_to_string(path)?;
        let rules: Vec<Rule> =
            serde_json::from_str(&content).map_err(|e| StoreError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(RuleStore {
            path: path.to_path_buf(),
            rules,
        })
    }

    /// Write the current rule set back to the backing file, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(&self.rules).map_err(|e| StoreError::ParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Append a rule and persist.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), StoreError> {
        self.rules.push(rule);
        self.save()
    }

    /// Remove the rule at `index` (zero-based) and persist. Returns the
    /// removed rule.
    pub fn delete_rule(&mut self, index: usize) -> Result<Rule, StoreError> {
        if index >= self.rules.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        let removed = self.rules.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Replace the set with the bundled defaults and persist.
    pub fn reset_to_defaults(&mut self) -> Result<(), StoreError> {
        self.rules = default_rules();
        self.save()
    }

    /// The active rules, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
