use serde::{Deserialize, Serialize};

/// Block types shared by several grammars.
///
/// Grammar-specific types (`service`, `job`, `class`, ...) live next to their
/// grammar tables; top-level YAML keys become block types verbatim.
pub mod block_type {
    /// YAML document separator chunk
    pub const DOCUMENT: &str = "document";
    /// Text with no recognizable key (continuation of a value)
    pub const VALUE: &str = "value";
    /// Key indented deeper than a grammar's named-item level
    pub const NESTED_KEY: &str = "nested-key";
    /// `- key: value` sequence entry
    pub const LIST_ITEM: &str = "list-item";
    /// Function or method declaration
    pub const FUNCTION: &str = "function";
}

/// Structural metadata attached to a chunk.
///
/// Persisted downstream as three opaque text columns. `hierarchy` is
/// `"<block_type>:<name>"` when a name was extracted, `block_type` alone for
/// un-named sections and empty when nothing was recognized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkMetadata {
    /// Structural category (`service`, `step`, `class`, ...), possibly empty
    pub block_type: String,

    /// Composite `type:name` path, possibly empty
    pub hierarchy: String,

    /// Grammar that produced the classification
    pub language_id: String,
}

impl ChunkMetadata {
    /// Result for a chunk nothing recognized
    pub fn empty(language_id: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            ..Default::default()
        }
    }

    /// Un-named section: block type and hierarchy are the same string
    pub fn section(block_type: impl Into<String>, language_id: impl Into<String>) -> Self {
        let block_type = block_type.into();
        Self {
            hierarchy: block_type.clone(),
            block_type,
            language_id: language_id.into(),
        }
    }

    /// Named construct: hierarchy is `block_type:name`
    pub fn named(
        block_type: impl Into<String>,
        name: &str,
        language_id: impl Into<String>,
    ) -> Self {
        let block_type = block_type.into();
        Self {
            hierarchy: format!("{block_type}:{name}"),
            block_type,
            language_id: language_id.into(),
        }
    }

    /// Whether no rule recognized the chunk
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.block_type.is_empty() && self.hierarchy.is_empty()
    }

    /// Name part of the hierarchy, if one was extracted
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.hierarchy
            .strip_prefix(self.block_type.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
    }
}

/// Trim whitespace, then any run of surrounding `'`/`"` characters.
pub(crate) fn clean_name(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"')
}
