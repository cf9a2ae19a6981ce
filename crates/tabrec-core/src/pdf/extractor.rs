//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{DocumentSource, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::models::table::RawTable;

/// PDF document source.
///
/// lopdf handles loading and decryption, pdf-extract produces the page
/// text. There is no ruled-line detector here, so structural tables are
/// always empty and every page goes to the text tiers.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_empty_password: bool,
    page_text: Option<Vec<String>>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_empty_password: config.decrypt_empty_password,
            page_text: None,
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted copy.
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.page_text = None;
        Ok(())
    }

    fn pages_text(&mut self) -> Result<&[String]> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        if self.page_text.is_none() {
            let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
                .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
            debug!("Extracted text for {} pages", pages.len());
            self.page_text = Some(pages);
        }

        Ok(self.page_text.as_deref().unwrap_or_default())
    }

    fn check_page(&self, page: u32) -> Result<()> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        Ok(())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for PdfExtractor {
    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    fn structural_tables(&mut self, page: u32) -> Result<Vec<RawTable>> {
        self.check_page(page)?;
        Ok(Vec::new())
    }

    fn plain_text(&mut self, page: u32) -> Result<Option<String>> {
        self.check_page(page)?;
        let text = self
            .pages_text()?
            .get((page - 1) as usize)
            .filter(|t| !t.trim().is_empty())
            .cloned();
        Ok(text)
    }
}
