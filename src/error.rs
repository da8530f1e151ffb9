//! Structured error types for the ficha engine.
//!
//! Layout is infallible: every record produces a page. The variants below
//! cover the edges of the pipeline, namely parsing input, loading
//! configuration, serializing PDF bytes, and writing files.

use thiserror::Error;

/// The unified error type returned by all public ficha API functions.
#[derive(Debug, Error)]
pub enum FichaError {
    /// JSON input failed to parse as a record (or list of records).
    #[error("Failed to parse record: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A configuration file could not be read or understood.
    #[error("Config error: {0}")]
    Config(String),
    /// The PDF backend could not produce bytes for the document.
    #[error("Render error: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FichaError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the record schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FichaError::Parse { source: e, hint }
    }
}
