use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals for one project scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Files that passed the walk and path filters
    pub files: usize,

    /// Files some grammar claimed
    pub resolved: usize,

    /// Files skipped for size or by exclude/include patterns
    pub skipped: usize,

    /// Resolved files per grammar name
    pub grammars: BTreeMap<String, usize>,

    /// Errors encountered
    pub errors: Vec<String>,
}

impl ScanSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, grammar: Option<&str>) {
        self.files += 1;
        if let Some(grammar) = grammar {
            self.resolved += 1;
            *self.grammars.entry(grammar.to_string()).or_insert(0) += 1;
        }
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Files no grammar claimed
    pub fn unresolved(&self) -> usize {
        self.files - self.resolved
    }
}
