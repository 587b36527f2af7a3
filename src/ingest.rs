// src/ingest.rs
//! Parsing of uploaded URL CSVs.

use anyhow::Result;

use crate::models::CsvRow;

/// Parses an uploaded CSV into URL rows. The `url` header is required
/// (matched case-insensitively); `benefits` and `workplace type` headers are
/// optional per-row overrides. Rows without a URL value are skipped.
pub fn parse_csv(file_bytes: &[u8]) -> Result<Vec<CsvRow>> {
    let decoded = String::from_utf8_lossy(file_bytes);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let headers = reader.headers()?.clone();
    let field_index = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };

    let url_idx = field_index("url")
        .ok_or_else(|| anyhow::anyhow!("CSV must include a 'url' header"))?;
    let benefits_idx = field_index("benefits");
    let workplace_idx = field_index("workplace type");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let url = record.get(url_idx).unwrap_or("").trim();
        if url.is_empty() {
            continue;
        }

        let field_at = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        rows.push(CsvRow {
            url: url.to_string(),
            benefits: field_at(benefits_idx),
            workplace_type: field_at(workplace_idx),
        });
    }

    if rows.is_empty() {
        anyhow::bail!("CSV must include at least one URL");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_row_is_skipped() {
        let rows = parse_csv(b"url\nhttps://x\n,").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].url, "https://x");
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let rows = parse_csv(b"URL,Benefits,Workplace Type\nhttps://x,\"$100K\",hybrid\n").unwrap();
        assert_eq!(rows[0].url, "https://x");
        assert_eq!(rows[0].benefits, "$100K");
        assert_eq!(rows[0].workplace_type, "hybrid");
    }

    #[test]
    fn test_missing_url_header_is_an_error() {
        let err = parse_csv(b"link\nhttps://x\n").unwrap_err();
        assert!(err.to_string().contains("'url' header"));
    }

    #[test]
    fn test_no_valid_rows_is_an_error() {
        let err = parse_csv(b"url\n\n,\n").unwrap_err();
        assert!(err.to_string().contains("at least one URL"));
    }

    #[test]
    fn test_override_columns_default_to_empty() {
        let rows = parse_csv(b"url\nhttps://a\nhttps://b\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].benefits.is_empty());
        assert!(rows[0].workplace_type.is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let rows = parse_csv(b"url,benefits\n  https://x  ,  free lunch \n").unwrap();
        assert_eq!(rows[0].url, "https://x");
        assert_eq!(rows[0].benefits, "free lunch");
    }
}
