use crate::config::{build_globset, IndexingConfig};
use crate::error::{IndexerError, Result};
use crate::stats::ScanSummary;
use globset::GlobSet;
use grammar_chunker::{ChunkerConfig, GrammarRegistry, SplitPlan, StructuralGrammar};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// What the pipeline should do with one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePlan {
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,

    /// Resolved grammar name, `None` when no grammar claims the file
    pub grammar: Option<String>,

    /// Splitter configuration for resolved files
    pub split: Option<SplitPlan>,
}

/// Result of a project scan, plans sorted by path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub plans: Vec<FilePlan>,
    pub summary: ScanSummary,
}

/// Scanner for finding grammar-backed files in a project
pub struct FileScanner {
    root: PathBuf,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
    registry: GrammarRegistry,
    chunker: ChunkerConfig,
}

impl FileScanner {
    /// Scanner over `root` with the grammars and filters of `config`
    pub fn new(root: impl AsRef<Path>, config: &IndexingConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(root.display().to_string()));
        }
        config.chunker.validate()?;

        Ok(Self {
            root,
            include: build_globset(&config.include_patterns)?,
            exclude: build_globset(&config.exclude_patterns)?,
            registry: grammar_chunker::registry().filtered(&config.chunker.grammars)?,
            chunker: config.chunker.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the project (.gitignore aware, hidden files included) and plan
    /// every file that passes the filters
    pub fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false) // .github/ must be visited
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false);
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    report.summary.add_error(e.to_string());
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let Some(relative) = self.relative_path(path) else {
                continue;
            };

            if !self.passes_filters(&relative) {
                log::trace!("Filtered out {relative}");
                report.summary.add_skipped();
                continue;
            }

            if let Ok(meta) = entry.metadata() {
                if meta.len() > MAX_FILE_SIZE_BYTES {
                    log::debug!(
                        "Skipping large file {} ({} bytes > {})",
                        path.display(),
                        meta.len(),
                        MAX_FILE_SIZE_BYTES
                    );
                    report.summary.add_skipped();
                    continue;
                }
            }

            let content = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Failed to read {}: {e}", path.display());
                    report.summary.add_error(format!("{relative}: {e}"));
                    continue;
                }
            };

            let text = String::from_utf8_lossy(&content);
            let plan = self.plan_file(&relative, Some(text.as_ref()));
            report.summary.add_file(plan.grammar.as_deref());
            report.plans.push(plan);
        }

        report
            .plans
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        log::info!(
            "Scanned {} files: {} resolved, {} skipped",
            report.summary.files,
            report.summary.resolved,
            report.summary.skipped
        );
        report
    }

    /// Plan a single file by its relative path, confirmed by content when given
    pub fn plan_file(&self, relative_path: &str, content: Option<&str>) -> FilePlan {
        let handler = self.registry.resolve(relative_path, content);
        FilePlan {
            relative_path: relative_path.to_string(),
            grammar: handler.map(|h| h.name().to_string()),
            split: handler.map(|h| h.split_plan(&self.chunker)),
        }
    }

    fn passes_filters(&self, relative: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(relative) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(relative) {
                return false;
            }
        }
        true
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join("/"))
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

const IGNORED_SCOPES: &[&str] = &[
    // VCS / tooling
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    // caches / builds
    ".cache",
    "node_modules",
    ".terraform",
    ".terragrunt-cache",
    ".gradle",
    "target",
    ".venv",
    "__pycache__",
    // vendored code
    "vendor",
    "third_party",
    "third-party",
];

const MAX_FILE_SIZE_BYTES: u64 = 1_048_576; // 1 MB
