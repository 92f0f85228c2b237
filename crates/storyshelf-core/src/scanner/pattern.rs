//! Call-pattern matching for grouping and variant-adding calls.

use regex::Regex;

use crate::error::ScanResult;

/// A located call: where it starts and where its argument list begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallMatch {
    /// Offset of the first character of the pattern.
    pub start: usize,
    /// Offset just past the opening parenthesis.
    pub args: usize,
}

/// Compiled `name\s*(` pattern, optionally requiring a leading `.`.
///
/// There is no token-boundary check: `xstoriesOf(` matches `storiesOf`.
#[derive(Debug, Clone)]
pub struct CallPattern {
    regex: Regex,
}

impl CallPattern {
    /// Free-function call such as `storiesOf(`.
    pub fn function(name: &str) -> ScanResult<Self> {
        Self::compile(&format!(r"{}\s*\(", regex::escape(name)))
    }

    /// Method call such as `.add(`.
    pub fn method(name: &str) -> ScanResult<Self> {
        Self::compile(&format!(r"\.{}\s*\(", regex::escape(name)))
    }

    fn compile(pattern: &str) -> ScanResult<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// First match starting at or after `from` and ending at or before `end`.
    pub fn find(&self, text: &str, from: usize, end: usize) -> Option<CallMatch> {
        self.regex.find_at(&text[..end], from).map(|m| CallMatch {
            start: m.start(),
            args: m.end(),
        })
    }
}
