//! Visit records — the structured clinical data for one patient encounter.
//!
//! A record maps section names ("blood", "urine", "history", "ultrasound",
//! or whatever else a deployment records) to field → value maps. Sections
//! and fields that were never recorded are simply absent; the evaluator
//! treats absence as "condition not met", never as zero or false.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};


// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// A single recorded value: a lab number, a yes/no history item, or a
/// free-text finding.
///
/// `Null` lets records containing explicit nulls deserialize; a null field
/// evaluates exactly like a missing one. Serialization is untagged, so the
/// wire form is the plain JSON/YAML scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}


// ---------------------------------------------------------------------------
// VisitRecord
// ---------------------------------------------------------------------------

/// One patient encounter's data: section → field → value.
///
/// Evaluation only ever borrows a record; nothing in this crate mutates one
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitRecord {
    sections: HashMap<String, HashMap<String, Scalar>>,
}

impl VisitRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: record one field value.
    ///
    /// ```
    /// use visit_triage_core::visit::VisitRecord;
    ///
    /// let visit = VisitRecord::new()
    ///     .with_field("blood", "egfr", 45.0)
    ///     .with_field("history", "diabetes", true);
    /// ```
    pub fn with_field(mut self, section: &str, field: &str, value: impl Into<Scalar>) -> Self {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
        self
    }

    /// Look up a field value. `None` when the section or the field is absent.
    pub fn value(&self, section: &str, field: &str) -> Option<&Scalar> {
        self.sections.get(section)?.get(field)
    }

    /// All fields recorded under a section, if the section exists.
    pub fn section(&self, name: &str) -> Option<&HashMap<String, Scalar>> {
        self.sections.get(name)
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}


// ---------------------------------------------------------------------------
// VisitError / file loading
// ---------------------------------------------------------------------------

/// Errors from reading a visit record off disk.
#[derive(Debug)]
pub enum VisitError {
    IoError(std::io::Error),
    /// The file was readable but is not a valid visit record.
    ParseError { path: PathBuf, message: String },
    /// The file extension is neither `.json` nor `.yaml`/`.yml`.
    UnknownFormat(PathBuf),
}

impl fmt::Display for VisitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitError::IoError(e) => write!(f, "I/O error: {}", e),
            VisitError::ParseError { path, message } => {
                write!(f, "invalid visit record '{}': {}", path.display(), message)
            }
            VisitError::UnknownFormat(path) => {
                write!(
                    f,
                    "unrecognized visit file format '{}' (expected .json, .yaml, or .yml)",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for VisitError {}

impl From<std::io::Error> for VisitError {
    fn from(e: std::io::Error) -> Self {
        VisitError::IoError(e)
    }
}

/// Load a visit record from a `.json`, `.yaml`, or `.yml` file.
pub fn load_visit(path: &Path) -> Result<VisitRecord, VisitError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let parse: fn(&str) -> Result<VisitRecord, String> = match ext.as_deref() {
        Some("json") => parse_json,
        Some("yaml") | Some("yml") => parse_yaml,
        _ => return Err(VisitError::UnknownFormat(path.to_path_buf())),
    };

    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|message| VisitError::ParseError {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a visit record from a JSON string.
pub fn parse_json(content: &str) -> Result<VisitRecord, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

/// Parse a visit record from a YAML string.
pub fn parse_yaml(content: &str) -> Result<VisitRecord, String> {
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let visit = VisitRecord::new()
            .with_field("blood", "egfr", 45.0)
            .with_field("history", "diabetes", true)
            .with_field("ultrasound", "echogenicity", "Mildly increased");

        assert_eq!(visit.value("blood", "egfr"), Some(&Scalar::Number(45.0)));
        assert_eq!(visit.value("history", "diabetes"), Some(&Scalar::Bool(true)));
        assert_eq!(
            visit.value("ultrasound", "echogenicity"),
            Some(&Scalar::Text("Mildly increased".into()))
        );
    }

    #[test]
    fn absent_section_and_field_are_none() {
        let visit = VisitRecord::new().with_field("blood", "egfr", 45.0);
        assert_eq!(visit.value("urine", "acr"), None);
        assert_eq!(visit.value("blood", "creatinine"), None);
        assert!(visit.section("ultrasound").is_none());
    }

    #[test]
    fn parse_json_record_with_null() {
        let visit = parse_json(
            r#"{"blood": {"egfr": 85, "creatinine": null}, "history": {"diabetes": false}}"#,
        )
        .unwrap();

        assert_eq!(visit.value("blood", "egfr"), Some(&Scalar::Number(85.0)));
        assert_eq!(visit.value("blood", "creatinine"), Some(&Scalar::Null));
        assert_eq!(visit.value("history", "diabetes"), Some(&Scalar::Bool(false)));
    }

    #[test]
    fn parse_yaml_record() {
        let yaml = r#"
blood:
  egfr: 45
urine:
  acr: 350
ultrasound:
  kidneySize: Decreased
"#;
        let visit = parse_yaml(yaml).unwrap();
        assert_eq!(visit.value("blood", "egfr"), Some(&Scalar::Number(45.0)));
        assert_eq!(
            visit.value("ultrasound", "kidneySize"),
            Some(&Scalar::Text("Decreased".into()))
        );
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let err = load_visit(Path::new("/nonexistent/visit.txt")).unwrap_err();
        assert!(matches!(err, VisitError::UnknownFormat(_)));
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::Number(90.0).to_string(), "90");
        assert_eq!(Scalar::Number(12.5).to_string(), "12.5");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Text("Decreased".into()).to_string(), "Decreased");
    }
}
