//! A `SanitizationEngine` that strips Markdown and link syntax from prose so
//! the speech engine does not read symbols aloud.
//!
//! The work is a fixed, ordered table of regex rewrite passes. Order is part
//! of the contract: later passes assume the syntax removed by earlier ones is
//! already gone.
//!
//! Stripping is stable on ordinary prose but not on every input, because a
//! later pass can expose syntax an earlier pass already ran for. Known cases:
//! `\> quoted` becomes `> quoted` (a blockquote on the next run), and
//! `[a]#(b)` becomes `[a](b)` (a link on the next run).
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::SanitizationEngine;

/// One step of the stripping pipeline.
struct RewritePass {
    name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

impl RewritePass {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("built-in pass '{}' does not compile: {}", name, e));
        Self { name, regex, replacement }
    }
}

// Stops at quotes and angle brackets; trailing sentence punctuation stays behind.
const URL_TAIL: &str = r#"[^\s<>)"']*[^\s<>).,;:!?'"]"#;

const TLDS: &str = "com|org|net|edu|gov|io|ai|cn|xyz|top|info|me|site|club|dev|app|tech|tv|gg|so|uk|jp|de|fr|au|ca|us|hk|sg";

static PASSES: Lazy<Vec<RewritePass>> = Lazy::new(|| {
    vec![
        RewritePass::new("line_endings", r"\r\n?", "\n"),
        RewritePass::new("fenced_code", r"(?s)```.*?```", ""),
        RewritePass::new("inline_code", r"`[^`]*`", ""),
        RewritePass::new("heading", r"(?m)^[ ]{0,3}#{1,6}[ \t]+", ""),
        RewritePass::new("list_bullet", r"(?m)^[ \t]*[-*+][ \t]+", ""),
        RewritePass::new("strong_asterisk", r"\*\*([^*]+)\*\*", "${1}"),
        RewritePass::new("em_asterisk", r"\*([^*]+)\*", "${1}"),
        RewritePass::new("strong_underscore", r"__([^_]+)__", "${1}"),
        RewritePass::new("em_underscore", r"_([^_]+)_", "${1}"),
        RewritePass::new("image", r"!\[[^\]]*\]\([^)]*\)", ""),
        RewritePass::new("link", r"\[([^\]]+)\]\([^)]+\)", "${1}"),
        RewritePass::new(
            "html_anchor",
            r#"(?is)<a\s+[^>]*href\s*=\s*["'][^"']+["'][^>]*>(.*?)</a\s*>"#,
            "${1}",
        ),
        RewritePass::new("html_image", r"(?is)<img\b[^>]*>", ""),
        RewritePass::new("autolink", r"(?i)<(?:https?://|www\.)[^>\s]+>", ""),
        RewritePass::new(
            "bare_url",
            &format!(r"(?i)\b(?:https?://|ftp://|www\.){}", URL_TAIL),
            "",
        ),
        // A whole address is taken before the domain alternative can cut its local part.
        RewritePass::new(
            "bare_domain",
            &format!(
                r"(?i)(^|[^@\w.+-])(?:[\w.+-]+@[\w-]+(?:\.[\w-]+)+\b|(?:[a-z0-9-]+\.)+(?:{})\b(?:/(?:{})?)?)",
                TLDS, URL_TAIL
            ),
            "${1}",
        ),
        RewritePass::new("email", r"(?i)\b[\w.+-]+@[\w-]+(?:\.[\w-]+)+\b", ""),
        RewritePass::new("blockquote", r"(?m)^[ \t]*(?:>[ \t]?)+", ""),
        RewritePass::new(
            "horizontal_rule",
            r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$",
            "",
        ),
        RewritePass::new("backslash_escape", r"\\([*_`\\\[\]()>#+\-])", "${1}"),
        // No '>' here, so comparisons and leftover HTML survive.
        RewritePass::new("stray_symbols", r"[#*_`]+", ""),
        RewritePass::new("horizontal_space", r"[ \t\x0C\x0B]+", " "),
        RewritePass::new("blank_lines", r"[ \t]*\n(?:[ \t]*\n){2,}", "\n\n"),
    ]
});

/// Strips Markdown formatting, links, URLs and emails from narration text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStripper;

impl MarkupStripper {
    pub fn new() -> Self {
        Self
    }

    /// Runs every pass in order and trims the result.
    pub fn strip(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut working = text.to_string();
        for pass in PASSES.iter() {
            let rewritten = match pass.regex.replace_all(&working, pass.replacement) {
                Cow::Owned(changed) => changed,
                Cow::Borrowed(_) => continue,
            };
            trace!("Pass '{}' rewrote the text.", pass.name);
            working = rewritten;
        }

        let stripped = working.trim().to_string();
        debug!(
            "Stripped markup: {} bytes in, {} bytes out.",
            text.len(),
            stripped.len()
        );
        stripped
    }

    /// Names of the rewrite passes in the order they run.
    pub fn pass_names() -> Vec<&'static str> {
        PASSES.iter().map(|p| p.name).collect()
    }
}

impl SanitizationEngine for MarkupStripper {
    fn name(&self) -> &'static str {
        "strip"
    }

    fn sanitize(&self, content: &str) -> String {
        self.strip(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        MarkupStripper::new().strip(text)
    }

    #[test]
    fn all_passes_compile() {
        assert_eq!(MarkupStripper::pass_names().len(), 23);
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(strip(""), "");
        assert_eq!(strip("   \n\t "), "");
    }

    #[test]
    fn heading_and_emphasis() {
        assert_eq!(
            strip("# Title\n\nSome **bold** and _italic_ text."),
            "Title\n\nSome bold and italic text."
        );
    }

    #[test]
    fn link_and_bare_url_keep_trailing_period() {
        assert_eq!(
            strip("Check [docs](https://example.com/docs) or visit www.example.com."),
            "Check docs or visit ."
        );
    }

    #[test]
    fn quote_rule_and_inline_code() {
        assert_eq!(strip("> quoted line\n---\ncode: `x=1`"), "quoted line\n\ncode:");
    }

    #[test]
    fn fenced_code_block_is_dropped() {
        assert_eq!(
            strip("Before\n```rust\nfn main() {}\n```\nAfter"),
            "Before\n\nAfter"
        );
    }

    #[test]
    fn list_bullets_are_removed() {
        assert_eq!(strip("- one\n* two\n  + three"), "one\ntwo\nthree");
    }

    #[test]
    fn images_removed_links_unwrapped() {
        assert_eq!(
            strip("See ![diagram](img/d.png) and [the guide](guide.html) now"),
            "See and the guide now"
        );
    }

    #[test]
    fn html_anchor_and_image() {
        assert_eq!(
            strip(r#"Read <A class="x" HREF='https://x.io/a'>the post</a> <img src="p.png" /> today"#),
            "Read the post today"
        );
    }

    #[test]
    fn autolinks_removed() {
        assert_eq!(strip("Go to <https://example.org/x> or <www.test.net>!"), "Go to or !");
    }

    #[test]
    fn bare_domain_with_path_keeps_punctuation() {
        assert_eq!(strip("Docs live at example.io/guide/start, mostly."), "Docs live at , mostly.");
    }

    #[test]
    fn domain_must_end_on_tld_boundary() {
        assert_eq!(strip("the company.commission met"), "the company.commission met");
    }

    #[test]
    fn email_removed_whole() {
        assert_eq!(strip("Mail jane.doe+tts@example.com today"), "Mail today");
    }

    #[test]
    fn nested_blockquote_markers() {
        assert_eq!(strip("> > deep\n>shallow"), "deep\nshallow");
    }

    #[test]
    fn backslash_escapes_become_literals() {
        assert_eq!(strip(r"1 \+ 2 \- 3 \(ok\)"), "1 + 2 - 3 (ok)");
    }

    #[test]
    fn comparison_operators_survive() {
        assert_eq!(strip("if a > b and c >= d"), "if a > b and c >= d");
    }

    #[test]
    fn stray_symbols_and_whitespace() {
        assert_eq!(strip("tabs\t\tand   spaces #tag"), "tabs and spaces tag");
    }

    #[test]
    fn blank_lines_collapse_to_one_paragraph_break() {
        assert_eq!(strip("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn email_with_tld_like_local_part_removed_whole() {
        assert_eq!(strip("Contact bob.dev@example.com now"), "Contact now");
        assert_eq!(strip("Mail anna.de@firma.de today"), "Mail today");
        assert_eq!(strip("Ping x.me@host.zz later"), "Ping later");
    }

    #[test]
    fn crlf_input_is_normalised() {
        assert_eq!(strip("> quoted line\r\n---\r\ncode: `x=1`"), "quoted line\n\ncode:");
        assert_eq!(strip("a\r\n\r\n\r\n\r\nb"), "a\n\nb");
        assert_eq!(strip("# Title\r\n- item"), "Title\nitem");
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        assert_eq!(strip("a \n \n \n \nb"), "a\n\nb");
        assert_eq!(strip("a\n\t\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn second_pass_can_expose_new_syntax() {
        assert_eq!(strip(r"\> quoted"), "> quoted");
        assert_eq!(strip("[a]#(b)"), "[a](b)");
    }

    #[test]
    fn stripping_clean_text_is_stable() {
        let samples = [
            "# Title\n\nSome **bold** and _italic_ text.",
            "Check [docs](https://example.com/docs) or visit www.example.com.",
            "> quoted line\n---\ncode: `x=1`",
            r#"<a href="https://x.io">Docs</a> and <img src="a.png"> done"#,
            "Plain sentence, nothing to remove.",
        ];
        for sample in samples {
            let once = strip(sample);
            assert_eq!(strip(&once), once, "not stable for {:?}", sample);
        }
    }
}
