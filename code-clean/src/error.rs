use std::fmt;
use thiserror::Error;

/// The construct a span scan was looking for when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// A line carrying the function-declaration marker, scanning backward
    FunctionDeclaration,
    /// A line starting with `}`, scanning forward from a declaration
    FunctionEnd,
    /// The `}` closing an `if` block at the block's column
    IfBlockEnd,
    /// The `})` closing a function literal passed as a call argument
    FunctionLiteralEnd,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::FunctionDeclaration => write!(f, "function declaration"),
            Construct::FunctionEnd => write!(f, "end of function"),
            Construct::IfBlockEnd => write!(f, "end of if block"),
            Construct::FunctionLiteralEnd => write!(f, "end of function literal"),
        }
    }
}

/// Span failures. Any of these aborts the current finding without writing
/// anything; the run moves on to the next finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("{construct} not found (search started at line {line})")]
    SpanNotFound { construct: Construct, line: usize },

    #[error("line {line} is outside the file ({total} lines)")]
    LineOutOfRange { line: i64, total: usize },
}

/// Guards that make a driver leave a file alone without complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The finding's code names no rule this tool knows
    UnsupportedRule,
    /// The rule is known but was not enabled for this run
    RuleDisabled,
    /// The resource path matched an `--exclude` pattern
    Excluded,
    /// Complexity findings in test code are left alone
    TestFile,
    /// The message carries no `this literal "..."` phrase
    NoLiteralInMessage,
    /// The literal no longer appears in the file
    LiteralAbsent,
    /// A generated constant already precedes the literal's last occurrence
    AlreadyExtracted,
    /// The file never calls the exception constructor
    ConstructorAbsent,
    /// The file has no `}` to anchor the wrapper class on
    NoClosingBrace,
    /// The located span is longer than an empty body can be
    NotEmptyBody { lines: usize },
    /// The span holds nothing the complexity rewrite can act on
    NoCandidates,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedRule => write!(f, "unsupported rule"),
            SkipReason::RuleDisabled => write!(f, "rule disabled"),
            SkipReason::Excluded => write!(f, "path excluded"),
            SkipReason::TestFile => write!(f, "test file"),
            SkipReason::NoLiteralInMessage => write!(f, "no literal in message"),
            SkipReason::LiteralAbsent => write!(f, "literal not present in file"),
            SkipReason::AlreadyExtracted => write!(f, "literal already extracted"),
            SkipReason::ConstructorAbsent => write!(f, "exception constructor not present"),
            SkipReason::NoClosingBrace => write!(f, "no closing brace in file"),
            SkipReason::NotEmptyBody { lines } => write!(f, "span of {} lines is not an empty body", lines),
            SkipReason::NoCandidates => write!(f, "nothing to rewrite in span"),
        }
    }
}

/// What happened to one finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was rewritten; `lines_added` is the signed delta fed to the ledger
    Patched { lines_added: i64 },
    Skipped(SkipReason),
    Aborted(PatchError),
}
