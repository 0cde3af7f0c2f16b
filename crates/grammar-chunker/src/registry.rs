use crate::cascade::LanguageSpec;
use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::handler::{GrammarHandler, StructuralGrammar};
use crate::types::ChunkMetadata;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static BUILTIN: Lazy<GrammarRegistry> = Lazy::new(|| {
    GrammarRegistry::builtin()
        .unwrap_or_else(|e| panic!("built-in grammar tables failed self-check: {e}"))
});

/// Process-wide registry of the shipped grammars, compiled on first use
pub fn registry() -> &'static GrammarRegistry {
    &BUILTIN
}

/// Grammar handlers in resolution priority order.
///
/// Read-only after construction; share freely across threads.
#[derive(Debug, Clone)]
pub struct GrammarRegistry {
    handlers: Vec<GrammarHandler>,
}

impl GrammarRegistry {
    /// Compile every shipped grammar in priority order
    pub fn builtin() -> Result<Self> {
        let handlers = Grammar::PRIORITY
            .into_iter()
            .map(GrammarHandler::compile)
            .collect::<Result<Vec<_>>>()?;
        Self::from_handlers(handlers)
    }

    /// Registry over `handlers`, kept in the given order.
    ///
    /// Grammar names and aliases must be unique across handlers.
    pub fn from_handlers(handlers: Vec<GrammarHandler>) -> Result<Self> {
        let mut seen = HashSet::new();
        for handler in &handlers {
            let ids = std::iter::once(handler.name()).chain(handler.aliases().iter().copied());
            for id in ids {
                if !seen.insert(id.to_string()) {
                    return Err(GrammarError::DuplicateName(id.to_string()));
                }
            }
        }
        Ok(Self { handlers })
    }

    /// Subset of this registry, keeping priority order.
    ///
    /// `enabled` holds grammar names or aliases; empty keeps every grammar.
    pub fn filtered(&self, enabled: &[String]) -> Result<Self> {
        if enabled.is_empty() {
            return Ok(self.clone());
        }

        let mut keep = HashSet::new();
        for id in enabled {
            let handler = self
                .for_language(id)
                .ok_or_else(|| GrammarError::UnknownGrammar(id.clone()))?;
            keep.insert(handler.name().to_string());
        }

        let handlers = self
            .handlers
            .iter()
            .filter(|handler| keep.contains(handler.name()))
            .cloned()
            .collect();
        Ok(Self { handlers })
    }

    /// The single handler applicable to `path`.
    ///
    /// Path globs are checked first; content markers only when `content` is
    /// supplied. The first handler in priority order passing both wins.
    pub fn resolve(&self, path: &str, content: Option<&str>) -> Option<&GrammarHandler> {
        let resolved = self
            .handlers
            .iter()
            .find(|handler| handler.matches(path, content));
        match resolved {
            Some(handler) => log::debug!("{path}: resolved grammar {}", handler.name()),
            None => log::trace!("{path}: no grammar"),
        }
        resolved
    }

    /// Handler by grammar name
    pub fn get(&self, name: &str) -> Option<&GrammarHandler> {
        self.handlers.iter().find(|handler| handler.name() == name)
    }

    /// Handler by grammar name or alias, case-insensitive (`tf`, `sh`, `gradle`)
    pub fn for_language(&self, language: &str) -> Option<&GrammarHandler> {
        let language = language.trim().to_lowercase();
        self.handlers.iter().find(|handler| {
            handler.name() == language || handler.aliases().iter().any(|alias| *alias == language)
        })
    }

    /// Classify `text` with the grammar registered for `language`.
    ///
    /// Unknown languages yield an all-empty result.
    pub fn extract_metadata(&self, text: &str, language: &str) -> ChunkMetadata {
        self.for_language(language)
            .map(|handler| handler.extract_metadata(text))
            .unwrap_or_default()
    }

    /// Custom language registrations for the external splitter
    pub fn custom_languages(&self) -> Vec<LanguageSpec> {
        self.handlers
            .iter()
            .map(GrammarHandler::language_spec)
            .collect()
    }

    /// Handlers in priority order
    pub fn handlers(&self) -> impl Iterator<Item = &GrammarHandler> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
