use crate::cascade::{LanguageSpec, SeparatorCascade, SplitPlan};
use crate::config::ChunkerConfig;
use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, GrammarDefinition};
use crate::rules::RuleSet;
use crate::types::ChunkMetadata;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::borrow::Cow;

/// Capability shared by every grammar handler.
///
/// `extract_metadata` is total: unrecognized chunks yield an empty or
/// fallback classification, never an error.
pub trait StructuralGrammar {
    /// Unique grammar name
    fn name(&self) -> &str;

    /// Whether the grammar applies to `path`, confirmed by `content` when given
    fn matches(&self, path: &str, content: Option<&str>) -> bool;

    /// Boundaries for the external splitter, coarsest first
    fn separator_cascade(&self) -> &SeparatorCascade;

    /// Classify one chunk produced with this grammar's cascade
    fn extract_metadata(&self, text: &str) -> ChunkMetadata;
}

/// A grammar definition compiled and self-checked.
#[derive(Debug, Clone)]
pub struct GrammarHandler {
    definition: &'static GrammarDefinition,
    paths: GlobSet,
    cascade: SeparatorCascade,
    rules: RuleSet,
}

impl GrammarHandler {
    /// Compile one of the shipped grammars
    pub fn compile(grammar: Grammar) -> Result<Self> {
        Self::from_definition(grammar.definition())
    }

    /// Compile arbitrary grammar tables.
    ///
    /// Fails when a pattern or glob does not compile, the cascade is empty or
    /// uses lookaround, a deriver reads a missing capture group, or a
    /// structural cascade level has no rule recognizing its probe chunk.
    pub fn from_definition(definition: &'static GrammarDefinition) -> Result<Self> {
        let name = definition.name;
        let paths = build_path_set(name, definition.path_patterns)?;
        let cascade = SeparatorCascade::compile(name, definition.separators)?;
        let rules = RuleSet::compile(name, definition.comment_patterns, definition.rules)?;

        let handler = Self {
            definition,
            paths,
            cascade,
            rules,
        };
        handler.self_check()?;
        Ok(handler)
    }

    fn self_check(&self) -> Result<()> {
        for level in self.cascade.levels() {
            let Some(probe) = level.probe() else {
                continue;
            };
            if !self.rules.recognizes(probe) {
                return Err(GrammarError::UnrecognizedLevel {
                    grammar: self.definition.name.to_string(),
                    separator: level.pattern().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Static tables this handler was compiled from
    #[must_use]
    pub fn definition(&self) -> &'static GrammarDefinition {
        self.definition
    }

    /// Syntax family (`yaml` for compose files and workflows)
    #[must_use]
    pub fn base_language(&self) -> &'static str {
        self.definition.base_language
    }

    /// Language ids routed to this grammar besides its name
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.definition.aliases
    }

    /// Compiled classification rules
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Path check alone, without content markers
    #[must_use]
    pub fn matches_path(&self, path: &str) -> bool {
        let path: Cow<'_, str> = if path.contains('\\') {
            Cow::Owned(path.replace('\\', "/"))
        } else {
            Cow::Borrowed(path)
        };
        self.paths.is_match(path.as_ref())
    }

    /// Whether every content marker occurs in `content`
    #[must_use]
    pub fn has_content_markers(&self, content: &str) -> bool {
        self.definition
            .content_markers
            .iter()
            .all(|marker| content.contains(marker))
    }

    /// Registration for the external splitter
    #[must_use]
    pub fn language_spec(&self) -> LanguageSpec {
        LanguageSpec {
            language_name: self.definition.name.to_string(),
            separators_regex: self.separator_patterns(),
            aliases: self.definition.aliases.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Splitting configuration for a file resolved to this grammar
    #[must_use]
    pub fn split_plan(&self, config: &ChunkerConfig) -> SplitPlan {
        SplitPlan {
            language_name: self.definition.name.to_string(),
            separators_regex: self.separator_patterns(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }

    fn separator_patterns(&self) -> Vec<String> {
        self.cascade
            .patterns()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl StructuralGrammar for GrammarHandler {
    fn name(&self) -> &str {
        self.definition.name
    }

    fn matches(&self, path: &str, content: Option<&str>) -> bool {
        if !self.matches_path(path) {
            return false;
        }
        content.map_or(true, |content| self.has_content_markers(content))
    }

    fn separator_cascade(&self) -> &SeparatorCascade {
        &self.cascade
    }

    fn extract_metadata(&self, text: &str) -> ChunkMetadata {
        self.rules.classify(text)
    }
}

/// Each pattern is matched at the root and after any directory prefix.
/// `*` crosses `/`, as in `fnmatch`.
fn build_path_set(grammar: &str, patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        for candidate in [(*pattern).to_string(), format!("*/{pattern}")] {
            let glob = GlobBuilder::new(&candidate)
                .literal_separator(false)
                .build()
                .map_err(|e| GrammarError::invalid_glob(grammar, *pattern, e))?;
            builder.add(glob);
        }
    }
    builder
        .build()
        .map_err(|e| GrammarError::invalid_glob(grammar, patterns.join(", "), e))
}
