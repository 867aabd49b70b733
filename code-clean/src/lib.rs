//! Best-effort patcher for static-analysis findings.
//!
//! Reads findings (rule code, file, message, line) and rewrites the offending
//! files with plain line and substring heuristics. Nothing is parsed; edits
//! are not checked for preserving behaviour.

pub mod complexity;
pub mod config;
pub mod diff;
pub mod empty_body;
pub mod error;
pub mod exception;
pub mod finding;
pub mod ledger;
pub mod literal;
pub mod locate;
pub mod matcher;
pub mod naming;
pub mod patcher;
pub mod source;


pub use config::{ComplexityStrategy, LiteralScope, PatchConfig};
pub use error::{Construct, Outcome, PatchError, SkipReason};
pub use finding::{load_findings, parse_findings, Finding, Rule};
pub use ledger::LineLedger;
pub use naming::{HashSuffix, SequentialSuffix, SuffixSource};
pub use patcher::{Patcher, RunSummary};
pub use source::{FileChange, FileStore, SourceStore};
