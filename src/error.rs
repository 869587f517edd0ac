//! Cora error types with error codes
//!
//! Error code ranges:
//! - CORA-000-009: curriculum document errors
//! - CORA-020-029: graph errors
//! - CORA-090-099: IO/serialization errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoraError>;

/// Format a cycle list for display: each cycle joined with arrows,
/// cycles separated by semicolons.
fn format_cycles(cycles: &[Vec<String>]) -> String {
    if cycles.is_empty() {
        return "none".to_string();
    }
    cycles
        .iter()
        .map(|c| c.join(" → "))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// `CyclicGraph` is the only error the engine itself produces; the remaining
/// variants belong to the curriculum loader and CLI layer.
#[derive(Error, Debug)]
pub enum CoraError {
    // ═══════════════════════════════════════════
    // CURRICULUM DOCUMENT ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[CORA-001] Curriculum file not found: {path}")]
    CurriculumNotFound { path: String },

    #[error("[CORA-002] Invalid schema version: expected '{expected}', got '{actual}'")]
    InvalidSchemaVersion { expected: String, actual: String },

    // ═══════════════════════════════════════════
    // GRAPH ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error(
        "[CORA-020] Curriculum graph is not a DAG: {} cycle(s): {}",
        .cycles.len(),
        format_cycles(.cycles)
    )]
    CyclicGraph { cycles: Vec<Vec<String>> },

    // ═══════════════════════════════════════════
    // IO / SERIALIZATION ERRORS (090-099)
    // ═══════════════════════════════════════════
    #[error("[CORA-090] IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[CORA-091] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("[CORA-092] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl CoraError {
    /// Get the error code (e.g., "CORA-020")
    pub fn code(&self) -> &'static str {
        match self {
            Self::CurriculumNotFound { .. } => "CORA-001",
            Self::InvalidSchemaVersion { .. } => "CORA-002",
            Self::CyclicGraph { .. } => "CORA-020",
            Self::Io(_) => "CORA-090",
            Self::Json(_) => "CORA-091",
            Self::YamlParse(_) => "CORA-092",
        }
    }
}

impl FixSuggestion for CoraError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            CoraError::CurriculumNotFound { .. } => Some("Check the file path exists"),
            CoraError::InvalidSchemaVersion { .. } => {
                Some("Use 'cora/curriculum@0.1' as the schema version")
            }
            CoraError::CyclicGraph { .. } => {
                Some("Remove the listed prerequisite cycles at the content-authoring layer")
            }
            CoraError::Io(_) => Some("Check file path and permissions"),
            CoraError::Json(_) => Some("Check JSON syntax"),
            CoraError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
        }
    }
}
