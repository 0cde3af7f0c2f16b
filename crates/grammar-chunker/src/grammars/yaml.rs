//! Plain YAML, the fallback for `*.yml`/`*.yaml` files no specific grammar
//! claimed.
//!
//! Without a domain schema there is no "named item" depth: any indented key
//! is a nested key.

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};
use crate::types::block_type::{DOCUMENT, LIST_ITEM, NESTED_KEY, VALUE};

pub const NAME: &str = "yaml";

const SEPARATORS: &[Separator] = &[
    Separator::structural(r"\n---", "\n---\nkind: ConfigMap"),
    Separator::structural(r"\n[a-zA-Z_][\w-]*:", "\nserver:\n  port: 8080"),
    Separator::structural(r"\n  [a-zA-Z_][\w-]*:", "\n  port: 8080"),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Anchored(r"[ \t]+(?P<name>[a-zA-Z_][\w-]*):"),
        Deriver::Named(NESTED_KEY),
    ),
    RuleDef::new(
        Matcher::Anchored(r"\s*-\s+(?P<name>[a-zA-Z_][\w-]*):"),
        Deriver::Named(LIST_ITEM),
    ),
    RuleDef::new(Matcher::Anchored(r"(?P<name>[a-zA-Z_][\w-]*):"), Deriver::Key),
    RuleDef::new(Matcher::RawContains("---"), Deriver::Section(DOCUMENT)),
    RuleDef::new(Matcher::NonEmpty, Deriver::Section(VALUE)),
];

pub(crate) static DEFINITION: GrammarDefinition = GrammarDefinition {
    name: NAME,
    base_language: "yaml",
    path_patterns: &["*.yml", "*.yaml"],
    content_markers: &[],
    aliases: &["yml"],
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
        let meta = GrammarHandler::compile(Grammar::Yaml)
            .unwrap()
            .extract_metadata(text);
        (meta.block_type, meta.hierarchy)
    }

    #[test]
    fn matches_any_yaml_path() {
        let h = GrammarHandler::compile(Grammar::Yaml).unwrap();
        assert!(h.matches("config.yml", None));
        assert!(h.matches("deploy/k8s/app.yaml", Some("kind: Deployment")));
        assert!(!h.matches("config.json", None));
    }

    #[test]
    fn classifies_keys_by_indentation() {
        assert_eq!(classify("server:\n  port: 8080"), ("server".into(), "server".into()));
        assert_eq!(
            classify("  port: 8080"),
            ("nested-key".into(), "nested-key:port".into())
        );
        assert_eq!(
            classify("      deep: true"),
            ("nested-key".into(), "nested-key:deep".into())
        );
        assert_eq!(
            classify("  - name: first"),
            ("list-item".into(), "list-item:name".into())
        );
    }

    #[test]
    fn fallbacks() {
        assert_eq!(classify("---\n"), ("document".into(), "document".into()));
        assert_eq!(classify("  - plain scalar"), ("value".into(), "value".into()));
        assert_eq!(classify("# note"), (String::new(), String::new()));
    }
}
