//! Rewrite drivers and the run loop.
//!
//! Findings are handled strictly in input order. Each driver reads the
//! whole file, edits it, and writes it back before the next finding is
//! looked at. Line-based drivers shift the reported line by the ledger
//! first and record their net line delta afterwards; the whole-file drivers
//! (literal extraction, exception rename) leave the ledger alone.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::complexity::{extract_nested_funcs, reduce_blocks, SpanEdit};
use crate::config::{ComplexityStrategy, PatchConfig};
use crate::empty_body::fill_empty_body;
use crate::error::{Outcome, PatchError, SkipReason};
use crate::exception::rename_exception;
use crate::finding::{Finding, Rule};
use crate::ledger::LineLedger;
use crate::literal::{extract_literal, literal_from_message};
use crate::locate::{locate_function, Span};
use crate::naming::SuffixSource;
use crate::source::SourceStore;

/// Counters for the end-of-run report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub findings: usize,
    pub patched: usize,
    pub skipped: usize,
    pub aborted: usize,
    pub files_touched: BTreeSet<PathBuf>,
    pub test_files: BTreeSet<PathBuf>,
    pub blocks_commented: usize,
    pub funcs_extracted: usize,
}

impl RunSummary {
    fn count(&mut self, outcome: &Outcome) {
        self.findings += 1;
        match outcome {
            Outcome::Patched { .. } => self.patched += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Aborted(_) => self.aborted += 1,
        }
    }

    pub fn print(&self) {
        println!("\nRun summary:");
        println!("Findings processed: {}", self.findings);
        println!("Patched: {}", self.patched);
        println!("Skipped: {}", self.skipped);
        println!("Aborted: {}", self.aborted);
        println!("Files touched: {}", self.files_touched.len());
        println!("Test files skipped: {}", self.test_files.len());
        println!("Blocks commented out: {}", self.blocks_commented);
        println!("Nested functions extracted: {}", self.funcs_extracted);
    }
}

/// Run context: the file store, the ledger, the name source and the
/// counters. One `Patcher` lives for one run.
pub struct Patcher<S: SourceStore> {
    store: S,
    names: Box<dyn SuffixSource>,
    ledger: LineLedger,
    config: PatchConfig,
    summary: RunSummary,
}

impl<S: SourceStore> Patcher<S> {
    pub fn new(store: S, names: Box<dyn SuffixSource>, config: PatchConfig) -> Self {
        Self {
            store,
            names,
            ledger: LineLedger::new(),
            config,
            summary: RunSummary::default(),
        }
    }

    pub fn ledger(&self) -> &LineLedger {
        &self.ledger
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_parts(self) -> (S, RunSummary) {
        (self.store, self.summary)
    }

    /// Process every finding in order. Only fatal errors (unreadable or
    /// unwritable files) stop the run.
    pub fn run(&mut self, findings: &[Finding]) -> Result<()> {
        for finding in findings {
            self.apply(finding)?;
        }
        Ok(())
    }

    /// Dispatch one finding to its driver.
    pub fn apply(&mut self, finding: &Finding) -> Result<Outcome> {
        let relative = finding.relative_path();
        let path = self.config.resolve(relative);

        let outcome = match finding.rule() {
            None => Outcome::Skipped(SkipReason::UnsupportedRule),
            Some(rule) if !self.config.is_enabled(rule) => Outcome::Skipped(SkipReason::RuleDisabled),
            Some(_) if self.config.is_excluded(Path::new(relative)) => Outcome::Skipped(SkipReason::Excluded),
            Some(rule) => {
                info!("clean {} | {}: {}", relative, finding.rule_id(), finding.message);
                match rule {
                    Rule::DuplicatedLiteral => self.duplicated_literal(&path, finding)?,
                    Rule::CognitiveComplexity => self.cognitive_complexity(&path, relative, finding)?,
                    Rule::EmptyFunction => self.empty_function(&path, finding)?,
                    Rule::GenericException => self.generic_exception(&path)?,
                }
            }
        };

        match &outcome {
            Outcome::Patched { lines_added } => {
                debug!("patched {} ({:+} lines)", path.display(), lines_added);
                self.summary.files_touched.insert(path);
            }
            Outcome::Skipped(reason) => debug!("skip {} | {}: {}", relative, finding.code, reason),
            Outcome::Aborted(err) => error!("abort {} | {}: {}", relative, finding.rule_id(), err),
        }
        self.summary.count(&outcome);
        Ok(outcome)
    }

    fn duplicated_literal(&mut self, path: &Path, finding: &Finding) -> Result<Outcome> {
        let Some(literal) = literal_from_message(&finding.message) else {
            return Ok(Outcome::Skipped(SkipReason::NoLiteralInMessage));
        };
        let code = self.store.read_to_string(path)?;

        match extract_literal(&code, literal, self.config.literal_scope, self.names.as_mut()) {
            Ok(extracted) => {
                debug!("extracted {:?} as {}", literal, extracted.name);
                self.store.write(path, &extracted.code)?;
                Ok(Outcome::Patched { lines_added: 0 })
            }
            Err(reason) => Ok(Outcome::Skipped(reason)),
        }
    }

    fn cognitive_complexity(&mut self, path: &Path, relative: &str, finding: &Finding) -> Result<Outcome> {
        if self.config.skip_test_files && relative.contains("test") {
            self.summary.test_files.insert(path.to_path_buf());
            return Ok(Outcome::Skipped(SkipReason::TestFile));
        }

        let lines = self.store.read_lines(path)?;
        if self.config.skip_test_files
            && lines.iter().any(|line| line.contains("package") && line.contains("test"))
        {
            self.summary.test_files.insert(path.to_path_buf());
            return Ok(Outcome::Skipped(SkipReason::TestFile));
        }

        let span = match self.locate(path, &lines, finding) {
            Ok(span) => span,
            Err(err) => return Ok(Outcome::Aborted(err)),
        };
        let rewrite = match self.config.complexity {
            ComplexityStrategy::Comment => reduce_blocks(&lines, &span),
            ComplexityStrategy::Extract => extract_nested_funcs(&lines, &span, self.names.as_mut()),
        };
        let edit = match rewrite {
            Ok(edit) if edit.rewritten == 0 => return Ok(Outcome::Skipped(SkipReason::NoCandidates)),
            Ok(edit) => edit,
            Err(err) => return Ok(Outcome::Aborted(err)),
        };

        match self.config.complexity {
            ComplexityStrategy::Comment => self.summary.blocks_commented += edit.rewritten,
            ComplexityStrategy::Extract => self.summary.funcs_extracted += edit.rewritten,
        }
        self.commit(path, &lines, &span, edit)
    }

    fn empty_function(&mut self, path: &Path, finding: &Finding) -> Result<Outcome> {
        let lines = self.store.read_lines(path)?;
        let span = match self.locate(path, &lines, finding) {
            Ok(span) => span,
            Err(err) => return Ok(Outcome::Aborted(err)),
        };

        match fill_empty_body(&span) {
            Some(edit) => self.commit(path, &lines, &span, edit),
            None => Ok(Outcome::Skipped(SkipReason::NotEmptyBody { lines: span.len })),
        }
    }

    fn generic_exception(&mut self, path: &Path) -> Result<Outcome> {
        let code = self.store.read_to_string(path)?;
        match rename_exception(&code) {
            Ok(new_code) => {
                self.store.write(path, &new_code)?;
                Ok(Outcome::Patched { lines_added: 0 })
            }
            Err(reason) => Ok(Outcome::Skipped(reason)),
        }
    }

    /// Locate the function around the finding, shifted by the ledger.
    fn locate(&self, path: &Path, lines: &[String], finding: &Finding) -> Result<Span, PatchError> {
        let candidate = self
            .ledger
            .search_start(path, finding.start_line_number, lines.len())?;
        locate_function(lines, candidate)
    }

    /// Splice the edit into the file, write it, and book the line delta.
    fn commit(&mut self, path: &Path, lines: &[String], span: &Span, edit: SpanEdit) -> Result<Outcome> {
        let mut content = lines[..span.start].concat();
        content.push_str(&edit.replacement);
        content.push_str(&lines[span.end()..].concat());
        if !edit.appendix.is_empty() {
            content.push('\n');
            content.push_str(&edit.appendix);
        }

        self.store.write(path, &content)?;
        self.ledger.record(path, edit.lines_added);
        Ok(Outcome::Patched {
            lines_added: edit.lines_added,
        })
    }
}
