//! Cognitive-complexity rewrites.
//!
//! Two independent ways to make the analyzer stop counting nested logic in a
//! located function: comment the deep `if` blocks out, or hoist nested
//! function literals into their own top-level functions.

use crate::error::PatchError;
use crate::locate::Span;
use crate::matcher::{match_function_literal, match_if_block};
use crate::naming::SuffixSource;

/// Minimum column of an `if` for its block to be commented out.
pub const REDUCE_LEVEL: usize = 3;

pub const NESTED_FUNC_PREFIX: &str = "NestedFunc";

/// Replacement text for a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanEdit {
    /// Replaces the span's lines
    pub replacement: String,
    /// Signed change in the span's line count
    pub lines_added: i64,
    /// Code to append after the end of the file, separated by a newline
    pub appendix: String,
    /// Blocks commented out or functions extracted
    pub rewritten: usize,
}

/// Wrap every `if` block at column >= [`REDUCE_LEVEL`] in `/*` `*/` lines.
///
/// Candidate lines are skipped when they hold an `else `, a `//`, or follow a
/// line that already opens a block comment. Comment delimiters found inside a
/// wrapped block are removed. If any block fails to close inside the span,
/// the whole rewrite fails.
pub fn reduce_blocks(lines: &[String], span: &Span) -> Result<SpanEdit, PatchError> {
    let end = span.end();
    let mut replacement = String::new();
    let mut lines_added = 0i64;
    let mut rewritten = 0;
    let mut index = span.start;

    while index < end {
        let line = &lines[index];
        let opens_comment_above = index
            .checked_sub(1)
            .is_some_and(|prev| lines[prev].contains("/*"));

        match line.find("if ") {
            Some(col) if col >= REDUCE_LEVEL
                && !line.contains("else ")
                && !line.contains("//")
                && !opens_comment_above =>
            {
                let indent = "\t".repeat(col);
                let block = match_if_block(lines, col, index, end)?;
                replacement.push_str(&indent);
                replacement.push_str("/*\n");
                replacement.push_str(&block.text.replace("/*", "").replace("*/", ""));
                replacement.push_str(&indent);
                replacement.push_str("*/\n");
                lines_added += 2;
                rewritten += 1;
                index += block.lines;
            }
            _ => {
                replacement.push_str(line);
                index += 1;
            }
        }
    }

    Ok(SpanEdit {
        replacement,
        lines_added,
        appendix: String::new(),
        rewritten,
    })
}

/// Replace nested `func(...) {` literals with a reference to a new
/// top-level function holding the literal's body.
///
/// The declaration line of the span is never a candidate, nor is any line
/// mentioning `if`. Each literal becomes `<prefix>NestedFuncNNNN)` on one
/// line; the extracted functions are returned in `appendix`.
pub fn extract_nested_funcs(
    lines: &[String],
    span: &Span,
    names: &mut dyn SuffixSource,
) -> Result<SpanEdit, PatchError> {
    let end = span.end();
    let mut replacement = String::new();
    let mut appendix = String::new();
    let mut lines_added = 0i64;
    let mut rewritten = 0;
    let mut index = span.start;

    while index < end {
        let line = &lines[index];
        let brace_after_start = line.find('{').is_some_and(|pos| pos > 0);

        match line.find("func(") {
            Some(col) if index > span.start && brace_after_start && !line.contains("if") => {
                let name = format!("{}{}", NESTED_FUNC_PREFIX, names.next_suffix());
                let literal = match_function_literal(lines, col, index, end, &name)?;
                replacement.push_str(&line[..col]);
                replacement.push_str(&name);
                replacement.push_str(")\n");
                appendix.push_str(&literal.text);
                lines_added += 1 - literal.lines as i64;
                rewritten += 1;
                index += literal.lines;
            }
            _ => {
                replacement.push_str(line);
                index += 1;
            }
        }
    }

    Ok(SpanEdit {
        replacement,
        lines_added,
        appendix,
        rewritten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Construct;
    use crate::locate::locate_function;
    use crate::naming::SequentialSuffix;
    use crate::source::split_lines;

    const STACKED: &str = "func route(ctx *Context) {\n\
\tfor _, h := range ctx.handlers {\n\
\t\tswitch h.kind {\n\
\t\tcase 1:\n\
\t\t\tif h.enabled {\n\
\t\t\t\th.run()\n\
\t\t\t}\n\
\t\t\tif h.logged {\n\
\t\t\t\tlog(h)\n\
\t\t\t}\n\
\t\t}\n\
\t}\n\
}\n";

    #[test]
    fn test_two_stacked_blocks_grow_span_by_four() {
        let lines = split_lines(STACKED);
        let span = locate_function(&lines, 4).unwrap();
        let edit = reduce_blocks(&lines, &span).unwrap();

        assert_eq!(edit.rewritten, 2);
        assert_eq!(edit.lines_added, 4);
        assert_eq!(split_lines(&edit.replacement).len(), span.len + 4);
        assert!(edit.replacement.contains(
            "\t\t\t/*\n\t\t\tif h.enabled {\n\t\t\t\th.run()\n\t\t\t}\n\t\t\t*/\n"
        ));
        assert!(edit.replacement.contains(
            "\t\t\t/*\n\t\t\tif h.logged {\n\t\t\t\tlog(h)\n\t\t\t}\n\t\t\t*/\n"
        ));
    }

    #[test]
    fn test_shallow_else_and_commented_ifs_are_left_alone() {
        let source = "func f() {\n\
\tif a {\n\
\t\tb()\n\
\t\t\t} else if c {\n\
\t\t\t// if d {\n\
}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let edit = reduce_blocks(&lines, &span).unwrap();
        assert_eq!(edit.rewritten, 0);
        assert_eq!(edit.lines_added, 0);
        assert_eq!(edit.replacement, source);
    }

    #[test]
    fn test_line_after_open_comment_is_skipped() {
        let source = "func f() {\n\t\t\t/* legacy\n\t\t\tif x {\n\t\t\t}\n}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let edit = reduce_blocks(&lines, &span).unwrap();
        assert_eq!(edit.rewritten, 0);
    }

    #[test]
    fn test_nested_comment_markers_are_stripped() {
        let source = "func f() {\n\t\t\tif x {\n\t\t\t\ty() /* why */\n\t\t\t}\n}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let edit = reduce_blocks(&lines, &span).unwrap();
        assert_eq!(edit.rewritten, 1);
        assert!(edit.replacement.contains("\t\t\t\ty()  why \n"));
        assert_eq!(edit.replacement.matches("/*").count(), 1);
        assert_eq!(edit.replacement.matches("*/").count(), 1);
    }

    #[test]
    fn test_unclosed_block_aborts_whole_rewrite() {
        // The `}` sits at column 2, so the `if` at column 3 never closes.
        let source = "func f() {\n\t\t\tif x {\n\t\t\t\ty()\n\t\t}\n}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let err = reduce_blocks(&lines, &span).unwrap_err();
        assert_eq!(
            err,
            PatchError::SpanNotFound {
                construct: Construct::IfBlockEnd,
                line: 2,
            }
        );
    }

    const WITH_LITERAL: &str = "func TestRoutes(t *testing.T) {\n\
\tfor _, tc := range cases {\n\
\t\tt.Run(tc.name, func(t *testing.T) {\n\
\t\t\tcheck(t, tc)\n\
\t\t})\n\
\t}\n\
}\n";

    #[test]
    fn test_extract_nested_func() {
        let lines = split_lines(WITH_LITERAL);
        let span = locate_function(&lines, 3).unwrap();
        let mut names = SequentialSuffix::new();
        let edit = extract_nested_funcs(&lines, &span, &mut names).unwrap();

        assert_eq!(edit.rewritten, 1);
        assert_eq!(edit.lines_added, -2);
        assert_eq!(
            edit.replacement,
            "func TestRoutes(t *testing.T) {\n\
\tfor _, tc := range cases {\n\
\t\tt.Run(tc.name, NestedFunc0001)\n\
\t}\n\
}\n"
        );
        assert_eq!(edit.appendix, "func NestedFunc0001(t *testing.T) {\n\tcheck(t, tc)\n}\n\n");
        assert_eq!(
            split_lines(&edit.replacement).len() as i64,
            span.len as i64 + edit.lines_added
        );
    }

    #[test]
    fn test_extract_skips_declaration_and_conditionals() {
        let source = "func f() {\n\tif ok := run(func() {\n\t\tx()\n\t}); ok {\n\t}\n}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let mut names = SequentialSuffix::new();
        let edit = extract_nested_funcs(&lines, &span, &mut names).unwrap();
        assert_eq!(edit.rewritten, 0);
        assert!(edit.appendix.is_empty());
    }

    #[test]
    fn test_extract_unterminated_literal_aborts() {
        let source = "func f() {\n\tgo func() {\n\t\tx()\n\t}()\n}\n";
        let lines = split_lines(source);
        let span = locate_function(&lines, 0).unwrap();
        let mut names = SequentialSuffix::new();
        let err = extract_nested_funcs(&lines, &span, &mut names).unwrap_err();
        assert!(matches!(
            err,
            PatchError::SpanNotFound {
                construct: Construct::FunctionLiteralEnd,
                ..
            }
        ));
    }
}
