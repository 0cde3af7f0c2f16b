//! # Grammar Indexer
//!
//! Project scanning for grammar-aware chunking.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Config (.grammar-index.toml, [indexing])
//!     │
//!     ├──> File Scanner (.gitignore aware, include/exclude globs)
//!     │      └─> Relative paths + content
//!     │
//!     └──> Grammar Registry
//!            └─> FilePlan (grammar + split plan) per file
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use grammar_indexer::{load_config, FileScanner};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let root = Path::new("/path/to/project");
//!     let config = load_config(root);
//!     let report = FileScanner::new(root, &config)?.scan();
//!
//!     for (grammar, files) in &report.summary.grammars {
//!         println!("{grammar}: {files} files");
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod scanner;
mod stats;

pub use config::{load_config, IndexingConfig, CONFIG_FILE_NAME};
pub use error::{IndexerError, Result};
pub use scanner::{FilePlan, FileScanner, ScanReport};
pub use stats::ScanSummary;
