//! HCL / Terraform (`*.tf`, `*.hcl`, `*.tfvars`).

use crate::cascade::Separator;
use crate::grammar::GrammarDefinition;
use crate::rules::{Deriver, Matcher, RuleDef};

pub const NAME: &str = "hcl";

/// Block type of a block nested inside a top-level block (`lifecycle {`)
pub const BLOCK: &str = "block";
/// Block type of an `name = value` assignment
pub const ATTRIBUTE: &str = "attribute";

const SEPARATORS: &[Separator] = &[
    Separator::structural(
        r"\n(?:resource|data|module|provider|variable|output|locals|terraform|moved|import|removed|check) ",
        "\nresource \"aws_s3_bucket\" \"logs\" {\n  bucket = \"logs\"\n}",
    ),
    // Top-level assignments, the bulk of tfvars files
    Separator::structural(r"\n[a-zA-Z_][\w-]*\s*=", "\nregion = \"us-east-1\""),
    // Nested blocks one level deep
    Separator::structural(
        r"\n  [a-zA-Z_][\w-]*\s*\{",
        "\n  lifecycle {\n    prevent_destroy = true\n  }",
    ),
    Separator::textual(r"\n\n+"),
    Separator::textual(r"\n"),
    Separator::textual(" "),
];

const RULES: &[RuleDef] = &[
    RuleDef::new(
        Matcher::Anchored(
            r#"(?P<kind>resource|data)\s+"?(?P<name>[\w.-]+)"?\s+"?(?P<sub>[\w.-]+)"?\s*\{"#,
        ),
        Deriver::Keyword { lowercase: false },
    ),
    RuleDef::new(
        Matcher::Anchored(
            r#"(?P<kind>module|provider|variable|output|check|resource|data)\s+"?(?P<name>[\w.-]+)"?"#,
        ),
        Deriver::Keyword { lowercase: false },
    ),
    RuleDef::new(
        Matcher::Anchored(
            r"(?P<kind>resource|data|module|provider|variable|output|locals|terraform|moved|import|removed|check)\s*\{",
        ),
        Deriver::Keyword { lowercase: false },
    ),
    RuleDef::new(
        Matcher::Anchored(r"\s+(?P<name>[a-zA-Z_][\w-]*)\s*\{"),
        Deriver::Named(BLOCK),
    ),
    RuleDef::new(
        Matcher::Anchored(r"\s*(?P<name>[a-zA-Z_][\w-]*)\s*="),
        Deriver::Named(ATTRIBUTE),
    ),
];

pub(crate) static DEFINITION: GrammarDefinition = GrammarDefinition {
    name: NAME,
    base_language: "hcl",
    path_patterns: &["*.tf", "*.hcl", "*.tfvars"],
    content_markers: &[],
    aliases: &["tf", "tfvars"],
    separators: SEPARATORS,
    comment_patterns: &[r"^\s*(?:#|//).*$", r"^\s*(?:/\*|\*).*$"],
    rules: RULES,
};

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;
    use crate::handler::{GrammarHandler, StructuralGrammar};
    use pretty_assertions::assert_eq;

    fn classify(text: &str) -> (String, String) {
        let meta = GrammarHandler::compile(Grammar::Hcl)
            .unwrap()
            .extract_metadata(text);
        assert_eq!(meta.language_id, "hcl");
        (meta.block_type, meta.hierarchy)
    }

    fn pair(block_type: &str, hierarchy: &str) -> (String, String) {
        (block_type.to_string(), hierarchy.to_string())
    }

    #[test]
    fn labelled_blocks() {
        assert_eq!(
            classify("resource \"aws_s3_bucket\" \"logs\" {\n  bucket = \"x\"\n}"),
            pair("resource", "resource:aws_s3_bucket.logs")
        );
        assert_eq!(
            classify("data \"aws_ami\" \"ubuntu\" {"),
            pair("data", "data:aws_ami.ubuntu")
        );
        assert_eq!(
            classify("module \"vpc\" {\n  source = \"./vpc\"\n}"),
            pair("module", "module:vpc")
        );
        assert_eq!(classify("provider \"aws\" {"), pair("provider", "provider:aws"));
        assert_eq!(
            classify("variable \"region\" {\n  default = \"eu-west-1\"\n}"),
            pair("variable", "variable:region")
        );
        assert_eq!(classify("output \"bucket_arn\" {"), pair("output", "output:bucket_arn"));
    }

    #[test]
    fn unlabelled_blocks() {
        assert_eq!(classify("locals {\n  env = \"prod\"\n}"), pair("locals", "locals"));
        assert_eq!(classify("terraform {\n  required_version = \">= 1.5\"\n}"), pair("terraform", "terraform"));
        assert_eq!(classify("moved {\n  from = a\n  to = b\n}"), pair("moved", "moved"));
    }

    #[test]
    fn nested_blocks_and_attributes() {
        assert_eq!(
            classify("  lifecycle {\n    prevent_destroy = true\n  }"),
            pair("block", "block:lifecycle")
        );
        assert_eq!(classify("region = \"us-east-1\""), pair("attribute", "attribute:region"));
        assert_eq!(classify("  tags = {\n    Name = \"x\"\n  }"), pair("attribute", "attribute:tags"));
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            classify("# Logs bucket\n// managed by platform\n/* legacy */\nresource \"aws_s3_bucket\" \"logs\" {"),
            pair("resource", "resource:aws_s3_bucket.logs")
        );
    }

    #[test]
    fn unrecognized_is_empty() {
        assert_eq!(classify("}"), pair("", ""));
        assert_eq!(classify("\"just a string\""), pair("", ""));
        assert_eq!(classify(""), pair("", ""));
    }

    #[test]
    fn keyword_prefix_is_not_a_block() {
        // `resources` is an attribute, not a `resource` block
        assert_eq!(classify("resources = []"), pair("attribute", "attribute:resources"));
    }

    #[test]
    fn keyword_named_attributes() {
        assert_eq!(classify("data = \"x\""), pair("attribute", "attribute:data"));
        assert_eq!(classify("import = true"), pair("attribute", "attribute:import"));
        assert_eq!(classify("check = 1"), pair("attribute", "attribute:check"));
        assert_eq!(classify("module_name = \"x\""), pair("attribute", "attribute:module_name"));
        assert_eq!(classify("import {\n  to = aws_s3_bucket.logs\n}"), pair("import", "import"));
    }
}
