// src/resume.rs
//! Resume upload normalization: best-effort text extraction from PDF and
//! DOCX uploads, plain decode for everything else.

use anyhow::Result;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;
use tracing::warn;

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Decodes uploaded resume bytes into a whitespace-normalized string.
///
/// `.pdf` and `.docx` files get format-specific extraction; on any failure
/// there, and for every other extension, the bytes are decoded as text with
/// invalid sequences dropped. Fails only when nothing readable remains.
pub fn normalize_resume(raw: &[u8], filename: &str) -> Result<String> {
    let name_lower = filename.to_lowercase();
    let mut text: Option<String> = None;

    if name_lower.ends_with(".pdf") {
        match pdf_extract::extract_text_from_mem(raw) {
            Ok(extracted) => text = Some(extracted),
            Err(e) => warn!("PDF parse failed for {}: {}", filename, e),
        }
    }

    if text.is_none() && name_lower.ends_with(".docx") {
        match extract_docx_text(raw) {
            Ok(extracted) => text = Some(extracted),
            Err(e) => warn!("DOCX parse failed for {}: {}", filename, e),
        }
    }

    let text = text.unwrap_or_else(|| String::from_utf8_lossy(raw).into_owned());

    let normalized = whitespace_re().replace_all(&text, " ").trim().to_string();
    if normalized.is_empty() {
        anyhow::bail!("Could not parse text from {}", filename);
    }
    Ok(normalized)
}

/// Pulls paragraph text out of the main document part of a DOCX container.
fn extract_docx_text(raw: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(raw))?;
    let mut document = archive.by_name("word/document.xml")?;

    let mut xml = String::new();
    document.read_to_string(&mut xml)?;

    // Paragraph closes become line breaks so words from adjacent paragraphs
    // do not run together.
    let with_breaks = xml.replace("</w:p>", "</w:p>\n");
    let stripped = xml_tag_re().replace_all(&with_breaks, " ");
    let unescaped = stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    Ok(unescaped)
}
