use crate::complexity::SpanEdit;
use crate::locate::Span;

/// Lines an empty-body fill is recorded as adding, whatever the span length.
pub const FILL_LINES_ADDED: i64 = 2;

/// Comment placed inside an empty body: the span text with braces and
/// newlines removed, behind `  //`.
pub fn placeholder(text: &str) -> String {
    let signature: String = text.chars().filter(|c| !matches!(c, '{' | '}' | '\n')).collect();
    format!("  //{}", signature)
}

/// Insert a placeholder comment before the closing brace of a one- or
/// two-line function. Longer spans are not empty bodies and give `None`.
pub fn fill_empty_body(span: &Span) -> Option<SpanEdit> {
    if !(1..=2).contains(&span.len) {
        return None;
    }

    let comment = placeholder(&span.text);
    let replacement = span.text.replace('}', &format!("\n{}\n}}", comment));
    Some(SpanEdit {
        replacement,
        lines_added: FILL_LINES_ADDED,
        appendix: String::new(),
        rewritten: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate_function;
    use crate::source::split_lines;

    fn span_of(text: &str) -> Span {
        Span {
            start: 0,
            len: split_lines(text).len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_bare_braces() {
        let edit = fill_empty_body(&span_of("{}\n")).unwrap();
        assert_eq!(edit.replacement, "{\n  //\n}\n");
        assert_eq!(edit.lines_added, 2);
    }

    #[test]
    fn test_one_line_function() {
        let lines = split_lines("func (h *Hook) Close() {}\n");
        let span = locate_function(&lines, 0).unwrap();
        assert_eq!(span.len, 1);

        let edit = fill_empty_body(&span).unwrap();
        assert_eq!(edit.replacement, "func (h *Hook) Close() {\n  //func (h *Hook) Close() \n}\n");
        assert_eq!(split_lines(&edit.replacement).len(), 3);
    }

    #[test]
    fn test_two_line_function_still_counts_two() {
        let lines = split_lines("func (h *Hook) Close() {\n}\n");
        let span = locate_function(&lines, 0).unwrap();
        assert_eq!(span.len, 2);

        let edit = fill_empty_body(&span).unwrap();
        assert_eq!(edit.lines_added, 2);
        assert_eq!(edit.replacement, "func (h *Hook) Close() {\n\n  //func (h *Hook) Close() \n}\n");
    }

    #[test]
    fn test_longer_span_is_not_filled() {
        let lines = split_lines("func f() {\n\tx()\n}\n");
        let span = locate_function(&lines, 0).unwrap();
        assert!(fill_empty_body(&span).is_none());
    }
}
