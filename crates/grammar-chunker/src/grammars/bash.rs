//! Shell scripts (`*.sh`, `*.bash`, `*.zsh`). Only function definitions carry
//! structure; everything else is unrecognized.

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};
use crate::types::block_type::FUNCTION;

pub const NAME: &str = "bash";

const SEPARATORS: &[Separator] = &[
    Separator::structural(r"\nfunction ", "\nfunction deploy {\n  echo deploying\n}"),
    Separator::structural(r"\n[a-zA-Z_][\w:.-]*\s*\(\)", "\ncleanup() {\n  rm -rf \"$TMP\"\n}"),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Anchored(r"function\s+(?P<name>[a-zA-Z_][\w:.-]*)"),
        Deriver::Named(FUNCTION),
    ),
    RuleDef::new(
        Matcher::Anchored(r"(?P<name>[a-zA-Z_][\w:.-]*)\s*\(\)"),
        Deriver::Named(FUNCTION),
    ),
];

pub(crate) static DEFINITION: GrammarDefinition = GrammarDefinition {
    name: NAME,
    base_language: "bash",
    path_patterns: &["*.sh", "*.bash", "*.zsh"],
    content_markers: &[],
    aliases: &["sh", "zsh", "shell"],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*#.*$"],
    rules: RULES,
};

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;
    use crate::handler::{GrammarHandler, StructuralGrammar};
    use pretty_assertions::assert_eq;

    fn classify(text: &str) -> (String, String) {
        let meta = GrammarHandler::compile(Grammar::Bash)
            .unwrap()
            .extract_metadata(text);
        assert_eq!(meta.language_id, "bash");
        (meta.block_type, meta.hierarchy)
    }

    #[test]
    fn function_keyword_form() {
        assert_eq!(
            classify("function deploy {\n  kubectl apply -f k8s/\n}"),
            ("function".into(), "function:deploy".into())
        );
        assert_eq!(
            classify("function build_image() {"),
            ("function".into(), "function:build_image".into())
        );
    }

    #[test]
    fn posix_form() {
        assert_eq!(
            classify("cleanup() {\n  rm -rf \"$TMP\"\n}"),
            ("function".into(), "function:cleanup".into())
        );
        assert_eq!(
            classify("log::info () {"),
            ("function".into(), "function:log::info".into())
        );
    }

    #[test]
    fn shebang_and_comments_are_skipped() {
        assert_eq!(
            classify("#!/usr/bin/env bash\n# Deploys the app\nmain() {"),
            ("function".into(), "function:main".into())
        );
    }

    #[test]
    fn statements_are_unrecognized() {
        assert_eq!(classify("set -euo pipefail"), (String::new(), String::new()));
        assert_eq!(classify("echo \"done\""), (String::new(), String::new()));
        assert_eq!(classify(""), (String::new(), String::new()));
    }
}
