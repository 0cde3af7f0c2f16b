//! Dockerfiles and Containerfiles.
//!
//! Instructions are case-insensitive; block types are the lowercased
//! instruction keyword.

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};

pub const NAME: &str = "dockerfile";

const SEPARATORS: &[Separator] = &[
    // Build stages
    Separator::structural(r"\n(?:FROM|from) ", "\nFROM node:20-alpine AS build"),
    Separator::structural(
        r"\n(?:RUN|COPY|ADD|ENV|ARG|EXPOSE|WORKDIR|CMD|ENTRYPOINT|LABEL|USER|VOLUME|HEALTHCHECK|SHELL|ONBUILD|STOPSIGNAL|MAINTAINER) ",
        "\nRUN apt-get update && apt-get install -y curl",
    ),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    // FROM [--platform=...] image AS stage
    RuleDef::new(
        Matcher::Anchored(r"(?i)(?P<kind>from)[ \t]+(?:--\S+[ \t]+)*\S+[ \t]+as[ \t]+(?P<name>\S+)"),
        Deriver::Keyword { lowercase: true },
    ),
    RuleDef::new(
        Matcher::Anchored(r"(?i)(?P<kind>from)[ \t]+(?:--\S+[ \t]+)*(?P<name>\S+)"),
        Deriver::Keyword { lowercase: true },
    ),
    RuleDef::new(
        Matcher::Anchored(r"(?i)(?P<kind>arg|env)[ \t]+(?P<name>[A-Za-z_][A-Za-z0-9_]*)"),
        Deriver::Keyword { lowercase: true },
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?i)(?P<kind>run|copy|add|env|arg|expose|workdir|cmd|entrypoint|label|user|volume|healthcheck|shell|onbuild|stopsignal|maintainer)\b",
        ),
        Deriver::Keyword { lowercase: true },
    ),
];

pub(crate) static DEFINITION: GrammarDefinition = GrammarDefinition {
    name: NAME,
    base_language: "dockerfile",
    path_patterns: &[
        "Dockerfile",
        "Dockerfile.*",
        "*.dockerfile",
        "Containerfile",
        "Containerfile.*",
    ],
    content_markers: &[],
    aliases: &["containerfile"],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*#.*$"],
    rules: RULES,
};
