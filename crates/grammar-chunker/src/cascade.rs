use crate::error::{GrammarError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

const LOOKAROUND_MARKERS: [&str; 4] = ["(?=", "(?!", "(?<=", "(?<!"];

/// One boundary level of a separator cascade, as declared in a grammar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    /// Boundary pattern handed to the external splitter
    pub pattern: &'static str,

    /// Representative chunk starting at this boundary.
    ///
    /// Structural levels carry one so the startup self-check can prove a
    /// classification rule recognizes what the level produces. Textual levels
    /// (blank lines, newlines, spaces) have none.
    pub probe: Option<&'static str>,
}

impl Separator {
    /// Boundary that cuts at a structural construct
    pub const fn structural(pattern: &'static str, probe: &'static str) -> Self {
        Self {
            pattern,
            probe: Some(probe),
        }
    }

    /// Last-resort boundary with no structural meaning
    pub const fn textual(pattern: &'static str) -> Self {
        Self {
            pattern,
            probe: None,
        }
    }
}

/// A compiled cascade level
#[derive(Debug, Clone)]
pub struct CascadeLevel {
    separator: Separator,
    regex: Regex,
}

impl CascadeLevel {
    /// Source pattern
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        self.separator.pattern
    }

    /// Compiled boundary pattern
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Probe chunk for structural levels
    #[must_use]
    pub fn probe(&self) -> Option<&'static str> {
        self.separator.probe
    }

    /// Whether this level cuts at a structural construct
    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.separator.probe.is_some()
    }
}

/// Ordered, coarse-to-fine boundary patterns for one grammar.
#[derive(Debug, Clone)]
pub struct SeparatorCascade {
    levels: Vec<CascadeLevel>,
}

impl SeparatorCascade {
    /// Compile and validate a cascade declared by `grammar`.
    ///
    /// Rejects empty cascades, lookaround constructs and patterns that do not
    /// compile.
    pub fn compile(grammar: &str, separators: &[Separator]) -> Result<Self> {
        if separators.is_empty() {
            return Err(GrammarError::EmptyCascade(grammar.to_string()));
        }

        let mut levels = Vec::with_capacity(separators.len());
        for separator in separators {
            if has_lookaround(separator.pattern) {
                return Err(GrammarError::LookaroundSeparator {
                    grammar: grammar.to_string(),
                    pattern: separator.pattern.to_string(),
                });
            }
            let regex = Regex::new(separator.pattern)
                .map_err(|e| GrammarError::invalid_pattern(grammar, separator.pattern, e))?;
            levels.push(CascadeLevel {
                separator: *separator,
                regex,
            });
        }

        Ok(Self { levels })
    }

    /// Levels in priority order (coarsest first)
    pub fn levels(&self) -> impl Iterator<Item = &CascadeLevel> {
        self.levels.iter()
    }

    /// Level at `index` (0 = coarsest)
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&CascadeLevel> {
        self.levels.get(index)
    }

    /// Number of levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a compiled cascade
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Source patterns in priority order
    #[must_use]
    pub fn patterns(&self) -> Vec<&'static str> {
        self.levels.iter().map(CascadeLevel::pattern).collect()
    }
}

fn has_lookaround(pattern: &str) -> bool {
    LOOKAROUND_MARKERS
        .iter()
        .any(|marker| pattern.contains(marker))
}

/// Custom language registration consumed by the external splitter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageSpec {
    /// Language name the splitter keys the separators by
    pub language_name: String,

    /// Separator patterns, coarsest first
    pub separators_regex: Vec<String>,

    /// Other language ids routed to the same separators
    pub aliases: Vec<String>,
}

/// Splitting configuration installed for one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SplitPlan {
    /// Grammar name, used as the splitter language
    pub language_name: String,

    /// Separator patterns, coarsest first
    pub separators_regex: Vec<String>,

    /// Target chunk size in bytes
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in bytes
    pub chunk_overlap: usize,
}
