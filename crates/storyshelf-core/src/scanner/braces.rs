//! Brace-balanced region skipping.

use super::literal::{QuoteState, Step};
use super::pattern::CallPattern;
use crate::error::{ScanError, ScanResult};

/// Whichever came first in a scan window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Offset of an opening brace.
    Brace(usize),
    /// Offset just past the `(` of a variant-adding call.
    Call(usize),
}

/// Find the earlier of an opening brace or a `call` match in `[start, end)`.
pub fn find_brace_or_call(
    text: &str,
    start: usize,
    end: usize,
    call: &CallPattern,
) -> Option<Hit> {
    let brace = text[start..end].find('{').map(|i| start + i);
    let call = call.find(text, start, end);

    match (brace, call) {
        (Some(brace), Some(call)) if call.start < brace => Some(Hit::Call(call.args)),
        (Some(brace), _) => Some(Hit::Brace(brace)),
        (None, Some(call)) => Some(Hit::Call(call.args)),
        (None, None) => None,
    }
}

/// Offset just past the brace matching the one at `open`, searching `[open, end)`.
///
/// Braces inside string literals are not counted. A brace still open at
/// `end` is unbalanced, so a region never spills into the next group.
pub fn match_brace(text: &str, open: usize, end: usize) -> ScanResult<usize> {
    let mut depth = 0usize;
    let mut state = QuoteState::default();

    for (i, ch) in text[open..end].char_indices() {
        match state.step(ch) {
            Step::Code('{') => depth += 1,
            Step::Code('}') if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i + 1);
                }
            }
            _ => {}
        }
    }

    Err(ScanError::UnbalancedBraces { offset: open })
}
