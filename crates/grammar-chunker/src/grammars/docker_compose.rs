//! Docker Compose files (`docker-compose*.yml`, `compose*.yaml`, ...).

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};
use crate::types::block_type::{DOCUMENT, LIST_ITEM, NESTED_KEY, VALUE};

pub const NAME: &str = "docker-compose";

/// Block type of a two-space item under a top-level section (services,
/// volumes and networks alike)
pub const SERVICE: &str = "service";

const SEPARATORS: &[Separator] = &[
    Separator::structural(r"\n---", "\n---\nservices:"),
    // services:, volumes:, networks:, ...
    Separator::structural(r"\n[a-zA-Z_][\w-]*:\s*\n", "\nservices:\n  web:\n    image: nginx"),
    Separator::structural(r"\n  [a-zA-Z_][\w-]*:", "\n  web:\n    image: nginx"),
    // ports:, environment:, deploy:
    Separator::structural(r"\n    [a-zA-Z_][\w-]*:", "\n    ports:\n      - '80:80'"),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Anchored(r"  (?P<name>[a-zA-Z_][\w-]*):"),
        Deriver::Named(SERVICE),
    ),
    RuleDef::new(
        Matcher::Anchored(r"\s{4,}(?P<name>[a-zA-Z_][\w-]*):"),
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
    path_patterns: &[
        "docker-compose*.yml",
        "docker-compose*.yaml",
        "compose*.yml",
        "compose*.yaml",
    ],
    content_markers: &["services:"],
    aliases: &[],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*#.*$"],
    rules: RULES,
};

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;
    use crate::handler::{GrammarHandler, StructuralGrammar};
    use crate::types::ChunkMetadata;
    use pretty_assertions::assert_eq;

    fn handler() -> GrammarHandler {
        GrammarHandler::compile(Grammar::DockerCompose).unwrap()
    }

    fn classify(text: &str) -> ChunkMetadata {
        handler().extract_metadata(text)
    }

    fn expect(text: &str, block_type: &str, hierarchy: &str) {
        let meta = classify(text);
        assert_eq!(
            (meta.block_type.as_str(), meta.hierarchy.as_str(), meta.language_id.as_str()),
            (block_type, hierarchy, "docker-compose"),
            "input: {text:?}"
        );
    }

    #[test]
    fn matches_compose_file_names() {
        let h = handler();
        let content = "services:\n  web:\n    image: nginx";
        assert!(h.matches("docker-compose.yml", Some(content)));
        assert!(h.matches("docker-compose.yaml", Some(content)));
        assert!(h.matches("compose.yml", Some(content)));
        assert!(h.matches("compose.yaml", Some(content)));
        assert!(h.matches("docker-compose.override.yml", Some(content)));
        assert!(h.matches("infra/docker-compose.yml", Some(content)));
        assert!(h.matches("project/deploy/infra/compose.yml", Some(content)));
        assert!(h.matches("docker-compose.yml", None));
        assert!(h.matches("infra/docker-compose.yml", None));
    }

    #[test]
    fn rejects_non_compose_files() {
        let h = handler();
        assert!(!h.matches("docker-compose.yml", Some("version: '3'\nvolumes:\n  data:")));
        assert!(!h.matches("config.yml", Some("services:\n  web:")));
        assert!(!h.matches("config.yml", None));
    }

    #[test]
    fn cascade_has_seven_levels() {
        let patterns = handler().separator_cascade().patterns();
        assert_eq!(patterns.len(), 7);
        assert_eq!(patterns[0], r"\n---");
    }

    #[test]
    fn services() {
        expect("  web:\n    image: nginx", "service", "service:web");
        expect(
            "  db:\n    image: postgres:15\n    environment:\n      POSTGRES_DB: app",
            "service",
            "service:db",
        );
        expect("  my-service:\n    image: alpine", "service", "service:my-service");
    }

    #[test]
    fn nested_keys() {
        expect("    ports:\n      - '8080:80'", "nested-key", "nested-key:ports");
        expect("    environment:\n      POSTGRES_DB: mydb", "nested-key", "nested-key:environment");
        expect("      resources:\n        limits:\n          cpus: '0.5'", "nested-key", "nested-key:resources");
        expect("    image: nginx", "nested-key", "nested-key:image");
    }

    #[test]
    fn list_items() {
        expect("- path: ./docker-compose.override.yml", "list-item", "list-item:path");
        expect("      - name: web\n        image: nginx", "list-item", "list-item:name");
    }

    #[test]
    fn top_level_sections() {
        expect("services:\n", "services", "services");
        expect("volumes:\n", "volumes", "volumes");
        expect(
            "version: '3'\nservices:\n  grafana:\n    image: grafana/grafana",
            "version",
            "version",
        );
        expect("networks:\n  frontend:\n    driver: bridge", "networks", "networks");
    }

    #[test]
    fn fallbacks() {
        expect("---", "document", "document");
        expect("      - '80:80'", "value", "value");
        expect("", "", "");
        expect("  \n\t\n", "", "");
    }

    #[test]
    fn comments_do_not_mask_services() {
        expect("# Web frontend\n  web:\n    image: nginx", "service", "service:web");
    }
}
