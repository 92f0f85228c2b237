//! Story scanner.
//!
//! Finds `storiesOf('Group')` calls and the `.add('Variant', ...)` calls that
//! follow each of them. The text is never parsed: a small quote/escape/brace
//! state machine is enough to skip object literals and string contents so
//! that call-like text inside them is not picked up.
//!
//! ```rust
//! use storyshelf_core::parse_story_module;
//!
//! let groups = parse_story_module("storiesOf('Buttons').add('Primary', fn)").unwrap();
//! assert_eq!(groups[0].name, "Buttons");
//! assert_eq!(groups[0].variants, vec!["Primary"]);
//! ```

mod braces;
mod literal;
mod pattern;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ScanError, ScanResult};
use crate::story::StoryGroup;

pub use braces::{find_brace_or_call, match_brace, Hit};
pub use literal::{is_whitespace, read_literal, Literal};
pub use pattern::{CallMatch, CallPattern};

/// Default input cap, 4 MiB.
pub const DEFAULT_MAX_INPUT_LEN: usize = 4 * 1024 * 1024;

static DEFAULT_SCANNER: LazyLock<StoryScanner> = LazyLock::new(|| {
    StoryScanner::new(&ScanOptions::default()).expect("default call patterns compile")
});

/// Scan `text` with the default `storiesOf` / `.add` patterns.
pub fn parse_story_module(text: &str) -> ScanResult<Vec<StoryGroup>> {
    DEFAULT_SCANNER.scan(text)
}

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Name of the grouping function.
    #[serde(default = "default_group_call")]
    pub group_call: String,

    /// Name of the variant-adding method.
    #[serde(default = "default_variant_method")]
    pub variant_method: String,

    /// Inputs longer than this many bytes are rejected.
    #[serde(default = "default_max_input_len")]
    pub max_input_len: Option<usize>,
}

fn default_group_call() -> String {
    "storiesOf".to_string()
}

fn default_variant_method() -> String {
    "add".to_string()
}

fn default_max_input_len() -> Option<usize> {
    Some(DEFAULT_MAX_INPUT_LEN)
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            group_call: default_group_call(),
            variant_method: default_variant_method(),
            max_input_len: default_max_input_len(),
        }
    }
}

/// Compiled scanner. Holds no per-scan state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct StoryScanner {
    group_call: CallPattern,
    variant_call: CallPattern,
    max_input_len: Option<usize>,
}

impl StoryScanner {
    /// Compile the call patterns described by `options`.
    pub fn new(options: &ScanOptions) -> ScanResult<Self> {
        Ok(Self {
            group_call: CallPattern::function(&options.group_call)?,
            variant_call: CallPattern::method(&options.variant_method)?,
            max_input_len: options.max_input_len,
        })
    }

    /// Scan one file's text.
    ///
    /// Groups come back in source order, each with its variants in source
    /// order. Any error aborts the whole scan.
    pub fn scan(&self, text: &str) -> ScanResult<Vec<StoryGroup>> {
        if let Some(max) = self.max_input_len {
            if text.len() > max {
                return Err(ScanError::InputTooLarge {
                    len: text.len(),
                    max,
                });
            }
        }

        let mut groups = Vec::new();
        let mut next = self.locate_group(text, 0);

        while let Some(call) = next {
            let name = match read_literal(text, call.args)? {
                Some(literal) => literal,
                None => return Err(ScanError::MissingGroupName { offset: call.args }),
            };

            next = self.locate_group(text, name.end);
            let window_end = next.map_or(text.len(), |call| call.start);
            let variants = self.collect_variants(text, name.end, window_end)?;

            trace!(group = %name.value, variants = variants.len(), "Found story group");
            groups.push(StoryGroup::new(name.value, variants));
        }

        Ok(groups)
    }

    /// Next grouping call at or after `from`.
    pub fn locate_group(&self, text: &str, from: usize) -> Option<CallMatch> {
        self.group_call.find(text, from, text.len())
    }

    /// Variant names in `[start, end)`, skipping brace-balanced regions.
    fn collect_variants(
        &self,
        text: &str,
        mut start: usize,
        end: usize,
    ) -> ScanResult<Vec<String>> {
        let mut variants = Vec::new();

        while start < end {
            match find_brace_or_call(text, start, end, &self.variant_call) {
                Some(Hit::Brace(open)) => start = match_brace(text, open, end)?,
                Some(Hit::Call(args)) => {
                    let literal = match read_literal(text, args)? {
                        Some(literal) if !literal.value.is_empty() => literal,
                        _ => return Err(ScanError::MissingVariantName { offset: args }),
                    };
                    variants.push(literal.value);
                    start = literal.end;
                }
                None => break,
            }
        }

        Ok(variants)
    }
}
