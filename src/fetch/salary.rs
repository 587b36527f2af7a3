// src/fetch/salary.rs
//! Salary and work-type normalization for scraped pages.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

fn salary_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"\$[^$\n]{1,40}?-\s*\$[^$\n]{1,40}?yr")
            .case_insensitive(true)
            .build()
            .expect("invalid salary-range pattern")
    })
}

fn salary_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$?\s*([0-9][0-9,\.]+)").unwrap())
}

fn work_type_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"\b(Hybrid|Remote|On[- ]?site)\b")
            .case_insensitive(true)
            .build()
            .expect("invalid work-type pattern")
    })
}

/// Finds a `$X - $Yyr`-shaped substring in the page, if any.
pub fn find_salary_range(html: &str) -> Option<String> {
    salary_range_re()
        .find(html)
        .map(|m| m.as_str().trim().to_string())
}

/// Normalizes salary strings like `"$265,000.00/yr"` or
/// `"$265,000 - $275,000/yr"` to `"$265K/yr"` form. Returns the input
/// unchanged when it cannot be parsed.
pub fn format_salary_to_k(value: &str) -> String {
    let numbers: Vec<&str> = salary_number_re()
        .captures_iter(value)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    if numbers.is_empty() {
        return value.to_string();
    }

    let to_k = |raw: &str| -> Option<String> {
        let num: f64 = raw.replace(',', "").parse().ok()?;
        Some(format!("${}K", (num / 1000.0).round() as i64))
    };

    let suffix = if value.to_lowercase().contains("yr") {
        "/yr"
    } else {
        ""
    };

    if numbers.len() >= 2 {
        match (to_k(numbers[0]), to_k(numbers[1])) {
            (Some(first), Some(second)) => format!("{first}{suffix} - {second}{suffix}"),
            _ => value.to_string(),
        }
    } else {
        match to_k(numbers[0]) {
            Some(only) => format!("{only}{suffix}"),
            None => value.to_string(),
        }
    }
}

/// Raw `Hybrid`/`Remote`/`On-site` word match, used for diagnostics only.
pub fn detect_work_type_word(html: &str) -> Option<String> {
    work_type_word_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolves the work-type label: the CSV override wins (capitalized), then
/// "hybrid" in the page, then "remote", then "Unavailable".
pub fn normalize_work_type(html: &str, workplace_override: Option<&str>) -> String {
    if let Some(override_value) = workplace_override {
        return capitalize(override_value);
    }

    let html_lower = html.to_lowercase();
    if html_lower.contains("hybrid") {
        "Hybrid".to_string()
    } else if html_lower.contains("remote") {
        "Remote".to_string()
    } else {
        "Unavailable".to_string()
    }
}

/// First letter uppercased, the rest lowercased.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_salary_normalized_to_thousands() {
        assert_eq!(format_salary_to_k("$265,000.00/yr"), "$265K/yr");
    }

    #[test]
    fn test_salary_range_normalized_per_bound() {
        assert_eq!(
            format_salary_to_k("$265,000 - $275,000/yr"),
            "$265K/yr - $275K/yr"
        );
    }

    #[test]
    fn test_salary_without_yr_suffix() {
        assert_eq!(format_salary_to_k("$90,000"), "$90K");
    }

    #[test]
    fn test_unparseable_salary_returned_unchanged() {
        assert_eq!(format_salary_to_k("Competitive"), "Competitive");
        assert_eq!(format_salary_to_k("$1.2.3/yr"), "$1.2.3/yr");
    }

    #[test]
    fn test_salary_range_found_in_page() {
        let html = "<span>$120,000 - $150,000/yr</span>";
        assert_eq!(
            find_salary_range(html).as_deref(),
            Some("$120,000 - $150,000/yr")
        );
        assert_eq!(find_salary_range("<span>no pay info</span>"), None);
    }

    #[test]
    fn test_hybrid_wins_over_remote() {
        let html = "remote friendly but hybrid expected";
        assert_eq!(normalize_work_type(html, None), "Hybrid");
    }

    #[test]
    fn test_remote_detected_when_no_hybrid() {
        assert_eq!(normalize_work_type("fully remote role", None), "Remote");
    }

    #[test]
    fn test_unknown_work_type_is_unavailable() {
        assert_eq!(normalize_work_type("on premises only", None), "Unavailable");
    }

    #[test]
    fn test_override_is_capitalized_and_wins() {
        assert_eq!(normalize_work_type("hybrid page", Some("remote")), "Remote");
        assert_eq!(normalize_work_type("", Some("ON-SITE")), "On-site");
    }

    #[test]
    fn test_work_type_word_detection() {
        assert_eq!(
            detect_work_type_word("This role is Hybrid in NYC").as_deref(),
            Some("Hybrid")
        );
        assert_eq!(
            detect_work_type_word("We work on site daily").as_deref(),
            Some("on site")
        );
        assert_eq!(detect_work_type_word("office based"), None);
    }
}
