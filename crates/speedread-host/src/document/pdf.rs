use log::debug;
use lopdf::Document;

use super::{DocumentError, PageSource};

/// Pages of an in-memory PDF, in document order.
pub struct PdfPages {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfPages {
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document = Document::load_mem(bytes)?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!(
            "document: pdf version={} pages={}",
            document.version,
            page_numbers.len()
        );

        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    /// Text items of one page joined by single spaces.
    fn page_text(&mut self, page: usize) -> Result<String, DocumentError> {
        let number = self
            .page_numbers
            .get(page)
            .copied()
            .ok_or_else(|| DocumentError::Page {
                page,
                message: "no such page".to_owned(),
            })?;

        let raw = self
            .document
            .extract_text(&[number])
            .map_err(|err| DocumentError::Page {
                page,
                message: err.to_string(),
            })?;
        Ok(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
