//! Decoder diagnostics
//!
//! Decoders never fail outright. Anything they cannot make sense of is
//! recorded as a `ParseError` next to the partial record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// A group matched none of the grammar rules
    #[error("Unknown component: {group}")]
    MalformedGroup { group: String },

    /// A structurally required field is missing
    #[error("Missing {field}")]
    IncompleteReport { field: String },

    /// Weather-shaped code containing a pair outside the code table
    #[error("Unsupported phenomenon code: {code}")]
    UnsupportedPhenomenonCode { code: String },

    /// Weather group reported together with CAVOK
    #[error("Weather group {group} ignored because CAVOK is reported")]
    SuppressedByCavok { group: String },
}

impl ParseError {
    pub fn malformed(group: impl Into<String>) -> Self {
        ParseError::MalformedGroup {
            group: group.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        ParseError::IncompleteReport {
            field: field.into(),
        }
    }

    pub fn unsupported(code: impl Into<String>) -> Self {
        ParseError::UnsupportedPhenomenonCode { code: code.into() }
    }
}
