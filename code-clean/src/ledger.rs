use std::collections::HashMap;
use std::path::Path;

use crate::error::PatchError;

/// Digest of a path, used as the ledger key.
pub fn file_key(path: &Path) -> String {
    let hash = blake3::hash(path.to_string_lossy().as_bytes());
    hash.to_hex().to_string()
}

/// Net lines inserted into each file by earlier edits in this run.
///
/// Analyzer line numbers describe the files as they were before the run.
/// After an edit adds or removes lines, later findings in the same file are
/// shifted by the accumulated delta before their span is located.
#[derive(Debug, Default, Clone)]
pub struct LineLedger {
    deltas: HashMap<String, i64>,
}

impl LineLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, path: &Path) -> i64 {
        self.deltas.get(&file_key(path)).copied().unwrap_or(0)
    }

    /// 0-based line to start searching from for a finding reported at
    /// `reported_line` (1-based): `reported_line - 1 + offset`.
    pub fn search_start(&self, path: &Path, reported_line: usize, total: usize) -> Result<usize, PatchError> {
        let line = reported_line as i64 - 1 + self.offset(path);
        if line < 0 || line as usize >= total {
            return Err(PatchError::LineOutOfRange { line: line + 1, total });
        }
        Ok(line as usize)
    }

    pub fn record(&mut self, path: &Path, lines_added: i64) {
        *self.deltas.entry(file_key(path)).or_insert(0) += lines_added;
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}
