use thiserror::Error;

/// Result type for grammar construction and configuration
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors raised while building grammar handlers.
///
/// Classification itself never fails; every variant here describes a defect in
/// a grammar table or configuration that is detected at startup.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// A separator, comment or rule pattern failed to compile
    #[error("grammar `{grammar}`: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        grammar: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A path glob failed to compile
    #[error("grammar `{grammar}`: invalid path glob `{pattern}`: {source}")]
    InvalidGlob {
        grammar: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Separator uses a lookaround construct the external splitter rejects
    #[error("grammar `{grammar}`: separator `{pattern}` uses a lookaround construct")]
    LookaroundSeparator { grammar: String, pattern: String },

    /// Grammar registered without any separators
    #[error("grammar `{0}` has an empty separator cascade")]
    EmptyCascade(String),

    /// A deriver reads a capture group its pattern does not define
    #[error("grammar `{grammar}`: rule `{pattern}` has no capture group `{group}`")]
    MissingCaptureGroup {
        grammar: String,
        pattern: String,
        group: &'static str,
    },

    /// A structural cascade level produces chunks no rule recognizes
    #[error("grammar `{grammar}`: no classification rule recognizes chunks split at `{separator}`")]
    UnrecognizedLevel { grammar: String, separator: String },

    /// Two handlers claim the same grammar name or alias
    #[error("duplicate grammar name or alias `{0}`")]
    DuplicateName(String),

    /// Configuration references a grammar that does not exist
    #[error("unknown grammar `{0}`")]
    UnknownGrammar(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GrammarError {
    /// Create an invalid pattern error
    pub fn invalid_pattern(
        grammar: impl Into<String>,
        pattern: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            grammar: grammar.into(),
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an invalid glob error
    pub fn invalid_glob(
        grammar: impl Into<String>,
        pattern: impl Into<String>,
        source: globset::Error,
    ) -> Self {
        Self::InvalidGlob {
            grammar: grammar.into(),
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
