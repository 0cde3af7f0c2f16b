use regex::Regex;

/// Drop leading blank and full-comment lines from a chunk.
///
/// Returns the text from the first line that is neither blank nor matched by
/// one of `comment_patterns`, with its original indentation. Returns an empty
/// string when every line is blank or a comment.
pub fn strip_leading_comments(text: &str, comment_patterns: &[Regex]) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let first_code_line = lines.iter().position(|line| {
        !line.trim().is_empty() && !comment_patterns.iter().any(|re| re.is_match(line))
    });

    match first_code_line {
        Some(idx) => lines[idx..].join("\n"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hash_comments() -> Vec<Regex> {
        vec![Regex::new(r"^\s*#.*$").unwrap()]
    }

    fn slash_comments() -> Vec<Regex> {
        vec![
            Regex::new(r"^\s*//.*$").unwrap(),
            Regex::new(r"^\s*(?:/\*|\*).*$").unwrap(),
        ]
    }

    #[test]
    fn keeps_text_without_comments() {
        let text = "  web:\n    image: nginx";
        assert_eq!(strip_leading_comments(text, &hash_comments()), text);
    }

    #[test]
    fn skips_leading_blank_lines() {
        assert_eq!(
            strip_leading_comments("\n\n   \nclass Foo {", &slash_comments()),
            "class Foo {"
        );
    }

    #[test]
    fn skips_comments_and_preserves_indentation() {
        let text = "# Build step\n  # more\n      - name: Build\n        run: make";
        assert_eq!(
            strip_leading_comments(text, &hash_comments()),
            "      - name: Build\n        run: make"
        );
    }

    #[test]
    fn stops_at_first_code_line() {
        let text = "// header\nclass A {\n// inner\n}";
        assert_eq!(
            strip_leading_comments(text, &slash_comments()),
            "class A {\n// inner\n}"
        );
    }

    #[test]
    fn skips_doc_comment_block() {
        let text = "/** Process data.\n  * @param items input\n  */\ndef process(List items) {";
        assert_eq!(
            strip_leading_comments(text, &slash_comments()),
            "def process(List items) {"
        );
    }

    #[test]
    fn all_comments_yield_empty() {
        assert_eq!(strip_leading_comments("# a\n\n# b\n", &hash_comments()), "");
        assert_eq!(strip_leading_comments("", &hash_comments()), "");
        assert_eq!(strip_leading_comments("   \n\t", &hash_comments()), "");
    }

    #[test]
    fn no_patterns_only_skips_blanks() {
        assert_eq!(strip_leading_comments("\n# not a comment", &[]), "# not a comment");
    }
}
