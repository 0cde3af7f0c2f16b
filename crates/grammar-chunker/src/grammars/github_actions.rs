//! GitHub Actions workflow files under `.github/workflows/`.
//!
//! Workflows are YAML with a fixed layout: top-level sections, jobs as
//! two-space keys under `jobs:`, job settings at four spaces and steps as
//! `- ` entries at six. The cascade cuts at exactly those depths and the rules
//! below recognize each of them.

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};
use crate::types::block_type::{DOCUMENT, LIST_ITEM, NESTED_KEY, VALUE};

pub const NAME: &str = "github-actions";

/// Block type of a workflow step
pub const STEP: &str = "step";
/// Block type of a job definition
pub const JOB: &str = "job";

const SEPARATORS: &[Separator] = &[
    Separator::structural(r"\n---", "\n---\nname: CI"),
    // Top-level keys: name:, on:, jobs:, env:, permissions:
    Separator::structural(
        r"\n[a-zA-Z_][\w-]*:\s*\n",
        "\njobs:\n  build:\n    runs-on: ubuntu-latest",
    ),
    // Job boundaries under jobs:
    Separator::structural(
        r"\n  [a-zA-Z_][\w-]*:",
        "\n  build:\n    runs-on: ubuntu-latest",
    ),
    // Job-level keys: runs-on:, steps:, env:
    Separator::structural(r"\n    [a-zA-Z_][\w-]*:", "\n    runs-on: ubuntu-latest"),
    // Step boundaries
    Separator::structural(
        r"\n      - ",
        "\n      - name: Checkout\n        uses: actions/checkout@v4",
    ),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Search(r"(?m)^\s*-\s+name:\s*(?P<name>.+)$"),
        Deriver::Named(STEP),
    ),
    RuleDef::new(
        Matcher::Search(r"(?m)^\s*-?\s*uses:\s*(?P<name>.+)$"),
        Deriver::Named(STEP),
    ),
    RuleDef::new(
        Matcher::Anchored(r"  (?P<name>[a-zA-Z_][\w-]*):"),
        Deriver::Named(JOB),
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
    path_patterns: &[".github/workflows/*.yml", ".github/workflows/*.yaml"],
    content_markers: &["on:", "jobs:"],
    aliases: &[],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*#.*$"],
    rules: RULES,
};
