//! Groovy sources and Gradle build scripts.

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};
use crate::types::block_type::FUNCTION;

pub const NAME: &str = "groovy";

const SEPARATORS: &[Separator] = &[
    // Type declarations with optional modifiers
    Separator::structural(
        r"\n(?:abstract |final |public |private |protected |static )*(?:class |interface |trait |enum )",
        "\nabstract class Animal {\n  abstract String sound()\n}",
    ),
    // Methods: `def` or one of the common return types
    Separator::structural(
        r"\n(?:public |private |protected |static |final |synchronized |abstract )*(?:def |void |int |long |double |float |boolean |String |Object |List |Map |Set )",
        "\nprivate void reset() {\n  count = 0\n}",
    ),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:abstract|final|public|private|protected|static)\s+)*class\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        ),
        Deriver::Named("class"),
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:public|private|protected)\s+)*interface\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        ),
        Deriver::Named("interface"),
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:public|private|protected|abstract)\s+)*trait\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        ),
        Deriver::Named("trait"),
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:public|private|protected)\s+)*enum\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        ),
        Deriver::Named("enum"),
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:public|private|protected|static|final|synchronized|abstract)\s+)*def\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
        ),
        Deriver::Named(FUNCTION),
    ),
    // Typed methods cut by the second cascade level
    RuleDef::new(
        Matcher::Anchored(
            r"(?:(?:public|private|protected|static|final|synchronized|abstract)\s+)*(?:void|int|long|double|float|boolean|String|Object|List|Map|Set)(?:<[^>\n]*>)?(?:\[\])?\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\(",
        ),
        Deriver::Named(FUNCTION),
    ),
];

pub(crate) static DEFINITION: GrammarDefinition = GrammarDefinition {
    name: NAME,
    base_language: "groovy",
    path_patterns: &["*.groovy", "*.gradle"],
    content_markers: &[],
    aliases: &["gradle"],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*//.*$", r"^\s*(?:/\*|\*).*$"],
    rules: RULES,
};
