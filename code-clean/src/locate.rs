//! Function-boundary locator.
//!
//! Finds the function enclosing an analyzer-reported line using nothing but
//! substring checks: walk up to the nearest line containing `func `, then
//! down to the first line that *starts* with `}`. Braces inside strings or
//! comments are not understood, so a `}` at column 0 inside a raw string
//! ends the span early.

use crate::error::{Construct, PatchError};

pub const DECLARATION_MARKER: &str = "func ";

/// A contiguous run of lines targeted by one rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// 0-based index of the first line
    pub start: usize,
    /// Number of lines
    pub len: usize,
    /// The lines concatenated, terminators included
    pub text: String,
}

impl Span {
    /// Index one past the last line.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Locate the function around `candidate` (0-based, inclusive).
pub fn locate_function(lines: &[String], candidate: usize) -> Result<Span, PatchError> {
    if candidate >= lines.len() {
        return Err(PatchError::LineOutOfRange {
            line: candidate as i64 + 1,
            total: lines.len(),
        });
    }

    let start = (0..=candidate)
        .rev()
        .find(|&i| lines[i].contains(DECLARATION_MARKER))
        .ok_or(PatchError::SpanNotFound {
            construct: Construct::FunctionDeclaration,
            line: candidate + 1,
        })?;

    let mut text = lines[start].clone();
    if lines[start].contains('}') {
        return Ok(Span { start, len: 1, text });
    }

    for (pos, line) in lines.iter().enumerate().skip(start + 1) {
        text.push_str(line);
        if line.starts_with('}') {
            return Ok(Span {
                start,
                len: pos - start + 1,
                text,
            });
        }
    }

    Err(PatchError::SpanNotFound {
        construct: Construct::FunctionEnd,
        line: start + 1,
    })
}
