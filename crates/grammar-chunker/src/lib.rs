//! # Grammar Chunker
//!
//! Grammar dispatch and structural chunk classification for configuration
//! and build files.
//!
//! ## Philosophy
//!
//! Chunks of declarative files carry little meaning on their own. The chunker
//! tags every chunk with where it sits in the file:
//! - Boundaries follow the grammar's structure (services, jobs, resources)
//! - Every chunk gets a `{block_type, hierarchy, language_id}` triple
//! - Unrecognized text is never an error, only an empty classification
//!
//! ## Architecture
//!
//! ```text
//! File path (+ content)
//!     │
//!     ├──> GrammarRegistry::resolve (priority order, path globs, markers)
//!     │
//!     ├──> SeparatorCascade → external splitter (SplitPlan)
//!     │
//!     └──> Per chunk
//!          ├─> Strip leading comment lines
//!          ├─> First matching rule wins
//!          └─> ChunkMetadata
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grammar_chunker::{registry, StructuralGrammar};
//!
//! let compose = "services:\n  web:\n    image: nginx\n";
//! let handler = registry()
//!     .resolve("deploy/docker-compose.yml", Some(compose))
//!     .expect("compose grammar");
//!
//! let meta = handler.extract_metadata("  web:\n    image: nginx");
//! assert_eq!(meta.block_type, "service");
//! assert_eq!(meta.hierarchy, "service:web");
//! assert_eq!(meta.language_id, "docker-compose");
//! ```

mod cascade;
mod comments;
mod config;
mod error;
mod grammar;
pub mod grammars;
mod handler;
mod preview;
mod registry;
mod rules;
mod types;

pub use cascade::{CascadeLevel, LanguageSpec, Separator, SeparatorCascade, SplitPlan};
pub use comments::strip_leading_comments;
pub use config::ChunkerConfig;
pub use error::{GrammarError, Result};
pub use grammar::{Grammar, GrammarDefinition};
pub use handler::{GrammarHandler, StructuralGrammar};
pub use preview::{byte_to_line, context_lines, preview_chunks, ContextLines, PreviewChunk};
pub use registry::{registry, GrammarRegistry};
pub use rules::{Deriver, Matcher, RuleDef, RuleSet};
pub use types::{block_type, ChunkMetadata};
