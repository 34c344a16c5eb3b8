//! Error types for XML reading, writing and schema validation.

use ech_wire::WireError;
use thiserror::Error;

use crate::gateway::Diagnostic;

#[derive(Error, Debug)]
pub enum XmlError {
    /// XML syntax error reported by quick-xml
    #[error("XML error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// IO error while reading or writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("element {element} mixes text and child elements")]
    MixedContent { element: String },

    #[error("undeclared namespace prefix {0:?}")]
    UnknownPrefix(String),

    #[error("unknown entity reference &{0};")]
    UnknownEntity(String),

    /// Structural or value error in the decoded tree
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("schema validation against {schema_id} failed: {}", summarize(.diagnostics))]
    SchemaValidationFailed {
        schema_id: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("schema {schema_id} could not be loaded: {reason}")]
    SchemaUnavailable { schema_id: String, reason: String },
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "no diagnostics".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Result type alias for XML operations
pub type Result<T> = std::result::Result<T, XmlError>;
