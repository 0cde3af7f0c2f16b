use crate::error::{IndexerError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use grammar_chunker::ChunkerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-level config file, looked up at the scan root
pub const CONFIG_FILE_NAME: &str = ".grammar-index.toml";

/// Which files to scan and how to split them.
///
/// ```toml
/// [indexing]
/// include_patterns = ["infra/**", "*.yml"]
/// exclude_patterns = ["**/fixtures/**"]
/// chunk_size = 1500
/// chunk_overlap = 200
/// grammars = ["hcl", "docker-compose"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Relative-path globs a file must match (empty = every file)
    pub include_patterns: Vec<String>,

    /// Relative-path globs that drop a file
    pub exclude_patterns: Vec<String>,

    #[serde(flatten)]
    pub chunker: ChunkerConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    indexing: IndexingConfig,
}

impl IndexingConfig {
    /// Parse the `[indexing]` table of a config document and validate it
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.indexing.validate()?;
        Ok(file.indexing)
    }

    /// Strict load: unreadable, malformed or invalid files are errors
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.chunker.validate()?;
        build_globset(&self.include_patterns)?;
        build_globset(&self.exclude_patterns)?;
        Ok(())
    }
}

/// Config for the project at `root`.
///
/// A missing file yields defaults. So does a malformed or invalid one, after
/// a warning: a bad config file must not stop indexing.
pub fn load_config(root: &Path) -> IndexingConfig {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        log::debug!("No {} at {}, using defaults", CONFIG_FILE_NAME, root.display());
        return IndexingConfig::default();
    }

    match IndexingConfig::load(&path) {
        Ok(config) => {
            log::debug!("Loaded indexing config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            IndexingConfig::default()
        }
    }
}

/// Compile relative-path globs; `None` when there are no patterns
pub(crate) fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| IndexerError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|source| IndexerError::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })?;
    Ok(Some(set))
}
