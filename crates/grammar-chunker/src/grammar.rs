use crate::cascade::Separator;
use crate::grammars;
use crate::rules::RuleDef;

/// Declarative tables describing one file format.
///
/// Everything here is `'static` data; `GrammarHandler::compile` turns it into
/// regexes and glob matchers and runs the startup self-check.
#[derive(Debug)]
pub struct GrammarDefinition {
    /// Unique grammar name, also the `language_id` of every classification
    pub name: &'static str,

    /// Syntax family the grammar refines (`yaml` for compose and workflows)
    pub base_language: &'static str,

    /// Shell-style globs matched against relative paths at any depth
    pub path_patterns: &'static [&'static str],

    /// Substrings that must all appear in content when content is available
    pub content_markers: &'static [&'static str],

    /// Other language ids routed to this grammar
    pub aliases: &'static [&'static str],

    /// Split boundaries, coarsest first
    pub separators: &'static [Separator],

    /// Patterns matching a full comment line
    pub comment_patterns: &'static [&'static str],

    /// Classification rules in priority order
    pub rules: &'static [RuleDef],
}

/// The closed set of shipped grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    GithubActions,
    DockerCompose,
    Yaml,
    Hcl,
    Dockerfile,
    Bash,
    Groovy,
}

impl Grammar {
    /// Resolution priority: specific grammars before generic ones sharing
    /// their base syntax
    pub const PRIORITY: [Grammar; 7] = [
        Grammar::GithubActions,
        Grammar::DockerCompose,
        Grammar::Yaml,
        Grammar::Hcl,
        Grammar::Dockerfile,
        Grammar::Bash,
        Grammar::Groovy,
    ];

    /// Static tables for this grammar
    #[must_use]
    pub fn definition(self) -> &'static GrammarDefinition {
        match self {
            Grammar::GithubActions => &grammars::github_actions::DEFINITION,
            Grammar::DockerCompose => &grammars::docker_compose::DEFINITION,
            Grammar::Yaml => &grammars::yaml::DEFINITION,
            Grammar::Hcl => &grammars::hcl::DEFINITION,
            Grammar::Dockerfile => &grammars::dockerfile::DEFINITION,
            Grammar::Bash => &grammars::bash::DEFINITION,
            Grammar::Groovy => &grammars::groovy::DEFINITION,
        }
    }

    /// Grammar name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.definition().name
    }

    /// Look up a grammar by name or alias (case-insensitive)
    #[must_use]
    pub fn from_language_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::PRIORITY.into_iter().find(|grammar| {
            let def = grammar.definition();
            def.name == id || def.aliases.iter().any(|alias| *alias == id)
        })
    }
}
