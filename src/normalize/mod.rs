// src/normalize/mod.rs

// --- Imports ---
use crate::utils::error::NormalizeError;
use scraper::{node::Node, Html};
use std::path::Path;

/// Inferred format of a raw filing document.
///
/// The file extension is only a candidacy filter: EDGAR `full-submission.txt`
/// files carry HTML despite the `.txt` extension, so the format is sniffed
/// from the content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Markup,
    PlainText,
}

impl DocumentFormat {
    /// Sniffs for markup by looking for a tag opener (`<` followed by a tag
    /// name, `/`, or `!`) anywhere in the content.
    pub fn sniff(content: &str) -> Self {
        let bytes = content.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'<' {
                if let Some(&next) = bytes.get(i + 1) {
                    if next.is_ascii_alphabetic() || next == b'/' || next == b'!' {
                        return DocumentFormat::Markup;
                    }
                }
            }
        }
        DocumentFormat::PlainText
    }
}

/// Reads one filing document from disk and flattens it to normalized text.
///
/// Filings occasionally carry stray non-UTF8 bytes, so decoding is lossy
/// rather than fatal. A document with no recoverable text at all is a
/// normalization failure; the caller logs it and moves on.
pub fn normalize_file(path: &Path) -> Result<String, NormalizeError> {
    let raw = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&raw);
    let flattened = flatten(&content, DocumentFormat::sniff(&content));
    if flattened.is_empty() {
        return Err(NormalizeError::EmptyDocument(path.display().to_string()));
    }
    Ok(flattened)
}

/// Flattens raw document content to a single whitespace-normalized string.
///
/// All offsets quoted by later pipeline stages are byte offsets into the
/// string returned here.
pub fn flatten(content: &str, format: DocumentFormat) -> String {
    match format {
        DocumentFormat::Markup => flatten_markup(content),
        DocumentFormat::PlainText => collapse_whitespace(content),
    }
}

/// Strips tags and attributes, keeping text content in document order.
/// html5ever recovers from malformed markup, so this extracts whatever
/// text content can be parsed instead of failing outright.
fn flatten_markup(content: &str) -> String {
    let document = Html::parse_document(content);
    let mut fragments: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        if let Node::Text(text_node) = node.value() {
            // Script/style bodies are code, not filing text.
            let in_ignored_element = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| matches!(el.name(), "script" | "style"))
                    .unwrap_or(false)
            });
            if !in_ignored_element {
                fragments.push(&text_node.text);
            }
        }
    }

    collapse_whitespace(&fragments.join(" "))
}

/// Collapses every whitespace run (spaces, newlines, tabs, nbsp) to a
/// single space and trims leading/trailing whitespace.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
