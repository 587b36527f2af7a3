// src/fetch/extractors.rs
//! Per-field extraction cascades for scraped job pages.
//!
//! Each field gets a ranked list of named pattern extractors; the first one
//! that captures a non-empty value wins. Patterns cover LinkedIn's embedded
//! JSON, its escaped-JSON variants, meta tags, and the visible top-card
//! markup, in that order of preference.

use regex::{Regex, RegexBuilder};

use super::html::unescape_entities;

/// One named pattern for one field. The capture group holds the value.
pub struct FieldExtractor {
    pub name: &'static str,
    pattern: Regex,
}

impl FieldExtractor {
    fn new(name: &'static str, pattern: &str) -> Self {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .expect("invalid extraction pattern");
        Self { name, pattern }
    }

    pub fn capture(&self, html: &str) -> Option<String> {
        let capture = self.pattern.captures(html)?.get(1)?;
        let value = unescape_entities(capture.as_str());
        (!value.is_empty()).then_some(value)
    }
}

/// A prioritized list of extractors for a single field.
pub struct Cascade {
    extractors: Vec<FieldExtractor>,
}

impl Cascade {
    fn new(extractors: Vec<FieldExtractor>) -> Self {
        Self { extractors }
    }

    /// Returns the first non-empty capture along with the name of the
    /// extractor that produced it.
    pub fn extract_named(&self, html: &str) -> Option<(&'static str, String)> {
        self.extractors
            .iter()
            .find_map(|e| e.capture(html).map(|value| (e.name, value)))
    }

    pub fn extract(&self, html: &str) -> Option<String> {
        self.extract_named(html).map(|(_, value)| value)
    }
}

/// All field cascades for a job page, compiled once.
pub struct PageExtractors {
    pub title: Cascade,
    pub company: Cascade,
    pub description: Cascade,
    pub location: Cascade,
    pub posted_at: Cascade,
    pub contact_person: Cascade,
}

impl Default for PageExtractors {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractors {
    pub fn new() -> Self {
        Self {
            title: Cascade::new(vec![
                FieldExtractor::new("json-title", r#""title"\s*:\s*"([^"]+)""#),
                FieldExtractor::new("escaped-json-title", r#"\\"title\\":\\"([^"\\]+)"#),
                FieldExtractor::new(
                    "og-title",
                    r#"<meta property="og:title"\s+content="([^"]+)""#,
                ),
                FieldExtractor::new(
                    "top-card-h1",
                    r#"<h1[^>]*class="[^"]*top-card-layout__title[^"]*"[^>]*>([^<]+)</h1>"#,
                ),
                FieldExtractor::new(
                    "topcard-h1",
                    r#"<h1[^>]*class="[^"]*topcard__title[^"]*"[^>]*>([^<]+)</h1>"#,
                ),
                FieldExtractor::new("title-tag", r"<title>([^<]+)</title>"),
            ]),
            company: Cascade::new(vec![
                FieldExtractor::new("json-company-name", r#""companyName"\s*:\s*"([^"]+)""#),
                FieldExtractor::new(
                    "escaped-json-company",
                    r#"\\"companyName\\":\\"([^"\\]+)"#,
                ),
                FieldExtractor::new("data-company-attr", r#"data-company-name="([^"]+)""#),
                FieldExtractor::new(
                    "universal-name",
                    r#""companyUniversalName"\s*:\s*"([^"]+)""#,
                ),
                FieldExtractor::new(
                    "decorated-company",
                    r#""decoratedCompany"\s*:\s*\{"name":"([^"]+)""#,
                ),
                FieldExtractor::new(
                    "top-card-company-link",
                    r#"<a[^>]*class="[^"]*top-card-layout__company-url[^"]*"[^>]*>([^<]+)</a>"#,
                ),
                FieldExtractor::new(
                    "topcard-org-link",
                    r#"<a[^>]*class="[^"]*topcard__org-name-link[^"]*"[^>]*>([^<]+)</a>"#,
                ),
                FieldExtractor::new(
                    "topcard-flavor",
                    r#"<span[^>]*class="[^"]*topcard__flavor[^"]*"[^>]*>([^<]+)</span>"#,
                ),
            ]),
            description: Cascade::new(vec![
                FieldExtractor::new("json-description", r#""description"\s*:\s*"(.+?)""#),
                FieldExtractor::new(
                    "escaped-json-description",
                    r#"\\"description\\":\\"(.+?)\\""#,
                ),
                FieldExtractor::new(
                    "show-more-markup",
                    r#"<div class="show-more-less-html__markup[^"]*">(.+?)</div>"#,
                ),
                FieldExtractor::new(
                    "meta-description",
                    r#"<meta name="description"\s+content="([^"]+)""#,
                ),
                FieldExtractor::new(
                    "og-description",
                    r#"<meta property="og:description"\s+content="([^"]+)""#,
                ),
            ]),
            location: Cascade::new(vec![
                FieldExtractor::new(
                    "json-formatted-location",
                    r#""formattedLocation"\s*:\s*"([^"]+)""#,
                ),
                FieldExtractor::new("json-job-location", r#""jobLocation"\s*:\s*"([^"]+)""#),
                FieldExtractor::new(
                    "escaped-formatted-location",
                    r#""formattedLocation"\s*:\s*\\"([^"\\]+)"#,
                ),
                FieldExtractor::new(
                    "topcard-flavor-bullet",
                    r#"<span[^>]*class="[^"]*topcard__flavor--bullet[^"]*"[^>]*>([^<]+)</span>"#,
                ),
                FieldExtractor::new(
                    "topcard-flavor",
                    r#"<span[^>]*class="[^"]*topcard__flavor[^"]*"[^>]*>([^<]+)</span>"#,
                ),
                FieldExtractor::new(
                    "navigation-bar-subtitle",
                    r"NavigationBarSubtitle&quot;:&quot;[^·]+·\s*([^(&]+)",
                ),
                FieldExtractor::new(
                    "navigation-bar-subtitle-camel",
                    r"&quot;navigationBarSubtitle&quot;:&quot;[^·]+·\s*([^(&]+)",
                ),
            ]),
            posted_at: Cascade::new(vec![FieldExtractor::new(
                "time-datetime",
                r#"<time[^>]*datetime="([^"]+)""#,
            )]),
            contact_person: Cascade::new(vec![
                FieldExtractor::new("message-aria-label", r#"aria-label="Message\s+([^"]+)""#),
                FieldExtractor::new(
                    "message-aria-label-single-quote",
                    r"aria-label='Message\s+([^']+)'",
                ),
                FieldExtractor::new("message-link-text", r"Message\s+([A-Za-z][A-Za-z\s\-']+)</"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_embedded_json_over_title_tag() {
        let html = r#"<title>Fallback Title</title><script>{"title": "Data Engineer"}</script>"#;
        let (name, value) = PageExtractors::new().title.extract_named(html).unwrap();
        assert_eq!(name, "json-title");
        assert_eq!(value, "Data Engineer");
    }

    #[test]
    fn test_title_falls_through_to_title_tag() {
        let html = "<html><head><title>Platform Engineer | Acme</title></head></html>";
        let (name, value) = PageExtractors::new().title.extract_named(html).unwrap();
        assert_eq!(name, "title-tag");
        assert_eq!(value, "Platform Engineer | Acme");
    }

    #[test]
    fn test_og_title_entities_are_decoded() {
        let html = r#"<meta property="og:title" content="ML Engineer &amp; Researcher">"#;
        assert_eq!(
            PageExtractors::new().title.extract(html).as_deref(),
            Some("ML Engineer & Researcher")
        );
    }

    #[test]
    fn test_company_from_data_attribute() {
        let html = r#"<div data-company-name="North Analytics"></div>"#;
        let (name, value) = PageExtractors::new().company.extract_named(html).unwrap();
        assert_eq!(name, "data-company-attr");
        assert_eq!(value, "North Analytics");
    }

    #[test]
    fn test_escaped_json_company_variant() {
        let html = r#"var data = "{\"companyName\":\"Signal Labs\"}";"#;
        assert_eq!(
            PageExtractors::new().company.extract(html).as_deref(),
            Some("Signal Labs")
        );
    }

    #[test]
    fn test_description_prefers_markup_fragment_over_meta() {
        let html = concat!(
            r#"<meta name="description" content="short teaser">"#,
            r#"<div class="show-more-less-html__markup">Full description body</div>"#,
        );
        let (name, value) = PageExtractors::new()
            .description
            .extract_named(html)
            .unwrap();
        // json patterns rank higher but do not match; the markup div wins
        // over the meta tag.
        assert_eq!(name, "show-more-markup");
        assert!(value.contains("Full description body"));
    }

    #[test]
    fn test_posted_at_from_time_element() {
        let html = r#"<time class="posted" datetime="2024-05-01T10:00:00Z">3 days ago</time>"#;
        assert_eq!(
            PageExtractors::new().posted_at.extract(html).as_deref(),
            Some("2024-05-01T10:00:00Z")
        );
    }

    #[test]
    fn test_contact_person_from_aria_label() {
        let html = r#"<button aria-label="Message Jane Doe">Message</button>"#;
        assert_eq!(
            PageExtractors::new()
                .contact_person
                .extract(html)
                .as_deref(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_location_from_topcard_bullet() {
        let html = r#"<span class="topcard__flavor--bullet">Zurich, Switzerland</span>"#;
        assert_eq!(
            PageExtractors::new().location.extract(html).as_deref(),
            Some("Zurich, Switzerland")
        );
    }

    #[test]
    fn test_empty_capture_falls_through_to_next_pattern() {
        let html = r#"<title> </title>"#;
        assert_eq!(PageExtractors::new().title.extract(html), None);
    }
}
