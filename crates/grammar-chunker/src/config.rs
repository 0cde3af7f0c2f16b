use crate::error::{GrammarError, Result};
use serde::{Deserialize, Serialize};

/// Configuration handed to the external splitter together with a grammar's
/// separator cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Target chunk size in bytes
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in bytes
    pub chunk_overlap: usize,

    /// Grammars to enable (empty = all shipped grammars)
    pub grammars: Vec<String>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 300,
            grammars: vec![],
        }
    }
}

impl ChunkerConfig {
    /// Larger chunks for long declarative files (compose stacks, workflows)
    pub fn for_large_files() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 400,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(GrammarError::invalid_config("chunk_size must be > 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(GrammarError::invalid_config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}
