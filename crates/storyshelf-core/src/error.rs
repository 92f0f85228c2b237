//! Error types for the story scanner.

use thiserror::Error;

/// Result type alias for scanner operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that abort a scan. Offsets are byte offsets into the scanned text.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A literal argument did not start with a quote character.
    #[error("malformed literal at offset {offset}: expected a quote, found {found:?}")]
    MalformedLiteral { offset: usize, found: char },

    /// The input ended inside a string literal.
    #[error("unterminated literal starting at offset {offset}")]
    UnterminatedLiteral { offset: usize },

    /// The input ended before the brace opened here was closed.
    #[error("unbalanced braces: brace at offset {offset} is never closed")]
    UnbalancedBraces { offset: usize },

    /// A grouping call had no usable name argument.
    #[error("missing story group name at offset {offset}")]
    MissingGroupName { offset: usize },

    /// A variant-adding call had no usable name argument.
    #[error("missing story variant name at offset {offset}")]
    MissingVariantName { offset: usize },

    /// The input exceeds the configured length cap.
    #[error("input of {len} bytes exceeds the {max} byte scan limit")]
    InputTooLarge { len: usize, max: usize },

    /// A call pattern could not be compiled.
    #[error("invalid call pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ScanError {
    /// Byte offset the error refers to, if it points into the text.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ScanError::MalformedLiteral { offset, .. }
            | ScanError::UnterminatedLiteral { offset }
            | ScanError::UnbalancedBraces { offset }
            | ScanError::MissingGroupName { offset }
            | ScanError::MissingVariantName { offset } => Some(*offset),
            ScanError::InputTooLarge { .. } | ScanError::Pattern(_) => None,
        }
    }
}
