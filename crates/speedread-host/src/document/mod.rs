//! Turns files on disk into plain reading text.
//!
//! Every extractor produces paragraphs separated by blank lines so the core
//! tokenizer can mark paragraph ends.

use std::{fs, io, path::Path, str::FromStr};

use log::{debug, info};
use thiserror::Error;

mod html;
mod html_entities;
mod markdown;
mod pdf;

pub use html::html_to_text;
pub use markdown::markdown_to_text;
pub use pdf::PdfPages;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Html,
    Pdf,
}

impl DocumentKind {
    /// Kind implied by a file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "txt" | "text" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PlainText => "text",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = DocumentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Self::PlainText),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" | "htm" | "xhtml" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            other => Err(DocumentError::UnknownKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),

    #[error("document is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("unknown document kind: {0}")]
    UnknownKind(String),

    #[error("unreadable PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("document contains no readable text")]
    Empty,

    #[error("failed to extract page {page}: {message}")]
    Page { page: usize, message: String },
}

/// Paginated document backend, one page of text at a time.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn page_text(&mut self, page: usize) -> Result<String, DocumentError>;
}

/// Concatenates all pages with blank lines between them.
pub fn join_pages<P: PageSource>(source: &mut P) -> Result<String, DocumentError> {
    let pages = source.page_count();
    let mut text = String::new();

    for page in 0..pages {
        let page_text = source.page_text(page)?;
        debug!(
            "document: page {}/{} chars={}",
            page + 1,
            pages,
            page_text.len()
        );
        text.push_str(&page_text);
        text.push_str("\n\n");
    }

    Ok(text.trim().to_owned())
}

/// Extracts reading text from raw file contents of a known kind.
pub fn extract_text(kind: DocumentKind, bytes: Vec<u8>) -> Result<String, DocumentError> {
    let text = match kind {
        DocumentKind::PlainText => String::from_utf8(bytes)?,
        DocumentKind::Markdown => markdown_to_text(&String::from_utf8(bytes)?),
        DocumentKind::Html => html_to_text(&bytes),
        DocumentKind::Pdf => join_pages(&mut PdfPages::parse(&bytes)?)?,
    };

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(text)
}

/// Reads `path` and extracts its text. `kind` overrides extension sniffing;
/// unknown extensions are read as plain text.
pub fn load_document(path: &Path, kind: Option<DocumentKind>) -> Result<String, DocumentError> {
    let kind = kind
        .or_else(|| DocumentKind::from_path(path))
        .unwrap_or(DocumentKind::PlainText);
    let bytes = fs::read(path)?;

    info!(
        "document: loading path={} kind={} bytes={}",
        path.display(),
        kind.label(),
        bytes.len()
    );
    extract_text(kind, bytes)
}

/// Reads a whole stream, e.g. stdin, as a document of `kind`.
pub fn read_document<R: io::Read>(
    mut reader: R,
    kind: DocumentKind,
) -> Result<String, DocumentError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    extract_text(kind, bytes)
}
