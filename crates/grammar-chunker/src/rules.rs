//! Ordered classification rules.
//!
//! Rules are plain data (`RuleDef`) compiled once per grammar. Evaluation is
//! first-match-wins over the comment-stripped chunk; when nothing matches the
//! result is empty rather than an error.

use crate::comments::strip_leading_comments;
use crate::error::{GrammarError, Result};
use crate::types::{clean_name, ChunkMetadata};
use regex::{Captures, Regex};

/// How a rule decides whether it applies to a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Pattern must match at the very start of the stripped chunk
    Anchored(&'static str),
    /// Pattern may match anywhere in the stripped chunk
    Search(&'static str),
    /// Raw chunk (before comment stripping) contains the marker
    RawContains(&'static str),
    /// Stripped chunk is non-empty; continuation fallback
    NonEmpty,
}

/// How a matching rule turns into block type and hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deriver {
    /// Fixed block type, hierarchy `type:<name>` from capture `name`
    Named(&'static str),
    /// Block type and hierarchy are the captured `name`
    Key,
    /// Fixed block type, hierarchy equal to it
    Section(&'static str),
    /// Block type from capture `kind`; hierarchy `kind:name[.sub]` when named
    Keyword { lowercase: bool },
}

impl Deriver {
    fn required_group(self) -> Option<&'static str> {
        match self {
            Deriver::Named(_) | Deriver::Key => Some("name"),
            Deriver::Keyword { .. } => Some("kind"),
            Deriver::Section(_) => None,
        }
    }
}

/// One `(matcher, deriver)` pair of a grammar's rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub matcher: Matcher,
    pub deriver: Deriver,
}

impl RuleDef {
    pub const fn new(matcher: Matcher, deriver: Deriver) -> Self {
        Self { matcher, deriver }
    }
}

#[derive(Debug, Clone)]
enum CompiledMatcher {
    Anchored(Regex),
    Search(Regex),
    RawContains(&'static str),
    NonEmpty,
}

#[derive(Debug, Clone)]
struct Rule {
    def: RuleDef,
    matcher: CompiledMatcher,
}

impl Rule {
    fn compile(grammar: &str, def: RuleDef) -> Result<Self> {
        let matcher = match def.matcher {
            Matcher::Anchored(pattern) => {
                // `\A` pins the match to the chunk start whatever flags the pattern sets
                let anchored = format!(r"\A(?:{pattern})");
                CompiledMatcher::Anchored(
                    Regex::new(&anchored)
                        .map_err(|e| GrammarError::invalid_pattern(grammar, pattern, e))?,
                )
            }
            Matcher::Search(pattern) => CompiledMatcher::Search(
                Regex::new(pattern).map_err(|e| GrammarError::invalid_pattern(grammar, pattern, e))?,
            ),
            Matcher::RawContains(marker) => CompiledMatcher::RawContains(marker),
            Matcher::NonEmpty => CompiledMatcher::NonEmpty,
        };

        if let Some(group) = def.deriver.required_group() {
            let defined = match &matcher {
                CompiledMatcher::Anchored(re) | CompiledMatcher::Search(re) => {
                    re.capture_names().flatten().any(|name| name == group)
                }
                CompiledMatcher::RawContains(_) | CompiledMatcher::NonEmpty => false,
            };
            if !defined {
                return Err(GrammarError::MissingCaptureGroup {
                    grammar: grammar.to_string(),
                    pattern: describe(def.matcher).to_string(),
                    group,
                });
            }
        }

        Ok(Self { def, matcher })
    }

    /// Returns `None` when the rule does not apply; `Some(None)` for a match
    /// without captures.
    fn apply<'t>(&self, raw: &str, stripped: &'t str) -> Option<Option<Captures<'t>>> {
        match &self.matcher {
            CompiledMatcher::Anchored(re) | CompiledMatcher::Search(re) => {
                re.captures(stripped).map(Some)
            }
            CompiledMatcher::RawContains(marker) => raw.contains(marker).then_some(None),
            CompiledMatcher::NonEmpty => (!stripped.is_empty()).then_some(None),
        }
    }

    fn derive(&self, captures: Option<&Captures<'_>>, language_id: &str) -> ChunkMetadata {
        let group = |name: &str| {
            captures
                .and_then(|caps| caps.name(name))
                .map(|m| m.as_str())
        };

        match self.def.deriver {
            Deriver::Named(block_type) => {
                ChunkMetadata::named(block_type, clean_name(group("name").unwrap_or("")), language_id)
            }
            Deriver::Key => ChunkMetadata::section(clean_name(group("name").unwrap_or("")), language_id),
            Deriver::Section(block_type) => ChunkMetadata::section(block_type, language_id),
            Deriver::Keyword { lowercase } => {
                let raw_kind = group("kind").unwrap_or("").trim();
                let kind = if lowercase {
                    raw_kind.to_lowercase()
                } else {
                    raw_kind.to_string()
                };
                match group("name").map(clean_name).filter(|n| !n.is_empty()) {
                    Some(name) => match group("sub").map(clean_name).filter(|s| !s.is_empty()) {
                        Some(sub) => ChunkMetadata::named(kind, &format!("{name}.{sub}"), language_id),
                        None => ChunkMetadata::named(kind, name, language_id),
                    },
                    None => ChunkMetadata::section(kind, language_id),
                }
            }
        }
    }

    fn is_continuation(&self) -> bool {
        matches!(self.def.matcher, Matcher::NonEmpty)
    }
}

fn describe(matcher: Matcher) -> &'static str {
    match matcher {
        Matcher::Anchored(p) | Matcher::Search(p) | Matcher::RawContains(p) => p,
        Matcher::NonEmpty => "<non-empty>",
    }
}

/// Compiled comment syntax plus ordered rules for one grammar.
#[derive(Debug, Clone)]
pub struct RuleSet {
    language_id: &'static str,
    comment_patterns: Vec<Regex>,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile comment patterns and rules; fails on bad patterns or derivers
    /// that read capture groups their pattern lacks.
    pub fn compile(
        language_id: &'static str,
        comment_patterns: &[&'static str],
        rules: &[RuleDef],
    ) -> Result<Self> {
        let comment_patterns = comment_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| GrammarError::invalid_pattern(language_id, *p, e)))
            .collect::<Result<Vec<_>>>()?;
        let rules = rules
            .iter()
            .map(|def| Rule::compile(language_id, *def))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            language_id,
            comment_patterns,
            rules,
        })
    }

    /// Classify a chunk. Total: never panics, never errors.
    #[must_use]
    pub fn classify(&self, text: &str) -> ChunkMetadata {
        self.classify_with_rule(text).0
    }

    /// Whether a structural rule (anything but the continuation fallback)
    /// recognizes the chunk
    #[must_use]
    pub fn recognizes(&self, text: &str) -> bool {
        match self.classify_with_rule(text).1 {
            Some(idx) => !self.rules[idx].is_continuation(),
            None => false,
        }
    }

    /// Leading comment and blank lines removed, per this grammar's syntax
    #[must_use]
    pub fn strip_comments(&self, text: &str) -> String {
        strip_leading_comments(text, &self.comment_patterns)
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn classify_with_rule(&self, text: &str) -> (ChunkMetadata, Option<usize>) {
        let stripped = self.strip_comments(text);
        for (idx, rule) in self.rules.iter().enumerate() {
            if let Some(captures) = rule.apply(text, &stripped) {
                return (rule.derive(captures.as_ref(), self.language_id), Some(idx));
            }
        }
        (ChunkMetadata::empty(self.language_id), None)
    }
}
