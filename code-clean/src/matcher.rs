//! Column-anchored brace matching.
//!
//! Both matchers assume tab indentation: a block opened at column `n` is
//! closed by a `}` at column `n`. Files indented with spaces, or mixing
//! tabs and spaces, are not supported and give undefined results.

use crate::error::{Construct, PatchError};

/// Lines consumed by a match, and the text they produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub text: String,
    pub lines: usize,
}

fn byte_at(line: &str, col: usize) -> Option<u8> {
    line.as_bytes().get(col).copied()
}

/// Match the `if` block opened on `lines[index]` at byte column `col`.
///
/// Scans from the `if` line itself up to (not including) `end` for a line
/// with `}` at `col` that is neither an `else` continuation nor a comment.
/// The returned text covers the `if` line through the closing line.
pub fn match_if_block(lines: &[String], col: usize, index: usize, end: usize) -> Result<Matched, PatchError> {
    let mut text = String::new();
    let end = end.min(lines.len());

    for (consumed, line) in lines[index.min(end)..end].iter().enumerate() {
        text.push_str(line);
        if byte_at(line, col) == Some(b'}') && !line.contains("else") && !line.contains("//") {
            return Ok(Matched {
                text,
                lines: consumed + 1,
            });
        }
    }

    Err(PatchError::SpanNotFound {
        construct: Construct::IfBlockEnd,
        line: index + 1,
    })
}

/// Number of tabs a line starts with.
pub fn leading_tabs(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b'\t').count()
}

/// Match a function literal passed as a call argument and rebuild it as a
/// top-level function called `name`.
///
/// `lines[start]` holds the literal's `func(` marker at byte column `col`.
/// The literal ends on the first following line with `})` at the opening
/// line's indentation depth. Body lines lose that much indentation. The
/// returned line count includes both the opening and closing lines.
pub fn match_function_literal(
    lines: &[String],
    col: usize,
    start: usize,
    end: usize,
    name: &str,
) -> Result<Matched, PatchError> {
    let opening = &lines[start];
    let depth = leading_tabs(opening);
    let indent = "\t".repeat(depth);

    let head = opening.strip_suffix('\n').unwrap_or(opening);
    let head = head.get(col..).unwrap_or_default();
    let mut text = head.replacen("func(", &format!("func {}(", name), 1);
    text.push('\n');

    let end = end.min(lines.len());
    for (offset, line) in lines[(start + 1).min(end)..end].iter().enumerate() {
        if byte_at(line, depth) == Some(b'}') && byte_at(line, depth + 1) == Some(b')') {
            text.push_str("}\n\n");
            return Ok(Matched {
                text,
                lines: offset + 2,
            });
        }
        text.push_str(line.strip_prefix(indent.as_str()).unwrap_or(line));
    }

    Err(PatchError::SpanNotFound {
        construct: Construct::FunctionLiteralEnd,
        line: start + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::split_lines;

    #[test]
    fn test_match_if_block() {
        let lines = split_lines(
            "\t\t\tif ok {\n\
             \t\t\t\tcount++\n\
             \t\t\t} else {\n\
             \t\t\t\tcount--\n\
             \t\t\t}\n\
             \t\treturn count\n",
        );
        let matched = match_if_block(&lines, 3, 0, lines.len()).unwrap();
        assert_eq!(matched.lines, 5);
        assert_eq!(matched.text, lines[..5].concat());
    }

    #[test]
    fn test_match_if_block_skips_commented_brace() {
        let lines = split_lines("\t\t\tif ok {\n\t\t\t} // done\n\t\t\t}\n");
        let matched = match_if_block(&lines, 3, 0, lines.len()).unwrap();
        assert_eq!(matched.lines, 3);
    }

    #[test]
    fn test_match_if_block_respects_boundary() {
        let lines = split_lines("\t\t\tif ok {\n\t\t\t\tx()\n\t\t\t}\n");
        let err = match_if_block(&lines, 3, 0, 2).unwrap_err();
        assert_eq!(
            err,
            PatchError::SpanNotFound {
                construct: Construct::IfBlockEnd,
                line: 1,
            }
        );
    }

    #[test]
    fn test_match_function_literal() {
        let lines = split_lines(
            "\t\tt.Run(\"case\", func(t *testing.T) {\n\
             \t\t\tif got != want {\n\
             \t\t\t\tt.Fail()\n\
             \t\t\t}\n\
             \t\t})\n",
        );
        let col = lines[0].find("func(").unwrap();
        let matched = match_function_literal(&lines, col, 0, lines.len(), "NestedFunc0001").unwrap();
        assert_eq!(matched.lines, 5);
        assert_eq!(
            matched.text,
            "func NestedFunc0001(t *testing.T) {\n\
             \tif got != want {\n\
             \t\tt.Fail()\n\
             \t}\n\
             }\n\n"
        );
    }

    #[test]
    fn test_match_function_literal_unterminated() {
        let lines = split_lines("\tgo func() {\n\t\twork()\n\t}\n");
        let col = lines[0].find("func(").unwrap();
        let err = match_function_literal(&lines, col, 0, lines.len(), "NestedFunc0001").unwrap_err();
        assert!(matches!(
            err,
            PatchError::SpanNotFound {
                construct: Construct::FunctionLiteralEnd,
                line: 1,
            }
        ));
    }

    #[test]
    fn test_leading_tabs() {
        assert_eq!(leading_tabs("\t\tx := 1\n"), 2);
        assert_eq!(leading_tabs("    x := 1\n"), 0);
    }
}
