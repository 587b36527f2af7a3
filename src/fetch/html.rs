// src/fetch/html.rs
//! Rough HTML-to-text conversion for scraped pages.

use regex::{Regex, RegexBuilder};
use scraper::Html;
use std::sync::OnceLock;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<script[^>]*>.*?</script>")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("invalid script pattern")
    })
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<style[^>]*>.*?</style>")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("invalid style pattern")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn posted_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"Posted\s+\d{1,2}:\d{2}:\d{2}\s+(AM|PM)\.?\s*")
            .case_insensitive(true)
            .build()
            .expect("invalid posted-time pattern")
    })
}

fn linkedin_boilerplate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"See this and similar jobs on LinkedIn\.?")
            .case_insensitive(true)
            .build()
            .expect("invalid boilerplate pattern")
    })
}

/// Decodes HTML entities in a fragment and joins its text nodes. Any markup
/// left in the fragment is dropped, with a space keeping adjacent words
/// apart.
pub fn unescape_entities(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Strips scripts, styles, and tags from a page, decodes entities, and
/// collapses whitespace runs to single spaces.
pub fn clean_html_to_text(html: &str) -> String {
    let without_scripts = script_re().replace_all(html, " ");
    let without_styles = style_re().replace_all(&without_scripts, " ");
    let without_tags = tag_re().replace_all(&without_styles, " ");
    let unescaped = unescape_entities(&without_tags);
    collapse_whitespace(&unescaped)
}

pub fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

/// Drops "Posted HH:MM:SS AM/PM" stamps and LinkedIn boilerplate from an
/// extracted description.
pub fn sanitize_description(text: &str) -> String {
    let without_stamp = posted_time_re().replace_all(text, "");
    linkedin_boilerplate_re()
        .replace_all(&without_stamp, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stripped_and_entities_decoded() {
        let text = clean_html_to_text("<p>Senior &amp; Staff</p><p>roles</p>");
        assert_eq!(text, "Senior & Staff roles");
    }

    #[test]
    fn test_script_and_style_content_removed() {
        let html = "<script>var skills = 'python';</script><style>.a{color:red}</style><b>SQL analyst</b>";
        assert_eq!(clean_html_to_text(html), "SQL analyst");
    }

    #[test]
    fn test_nbsp_collapses_into_plain_space() {
        assert_eq!(clean_html_to_text("data&nbsp;engineer"), "data engineer");
    }

    #[test]
    fn test_unescape_preserves_plain_text() {
        assert_eq!(unescape_entities("Acme &amp; Co"), "Acme & Co");
    }

    #[test]
    fn test_sanitize_removes_posted_stamp_and_boilerplate() {
        let text = "Posted 10:32:01 AM. Build data pipelines. See this and similar jobs on LinkedIn.";
        assert_eq!(sanitize_description(text), "Build data pipelines.");
    }
}
