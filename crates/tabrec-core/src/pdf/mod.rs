//! Document layer: page text and structurally detected tables.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::table::RawTable;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Form feed, the page separator used by `pdftotext` and friends.
pub const PAGE_SEPARATOR: char = '\x0c';

/// One page of text, split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Page number (1-indexed).
    pub number: u32,
    pub lines: Vec<String>,
}

impl PageContent {
    /// Split page text on line breaks. Absent text gives a page with no lines.
    pub fn from_text(number: u32, text: Option<&str>) -> Self {
        Self {
            number,
            lines: text
                .map(|t| t.lines().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// Trait for document sources the engine can read pages from.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Tables detected from ruled lines on a page (1-indexed). May be empty.
    fn structural_tables(&mut self, page: u32) -> Result<Vec<RawTable>>;

    /// Plain text of a page (1-indexed), `None` when the page has none.
    fn plain_text(&mut self, page: u32) -> Result<Option<String>>;
}

/// A document made of already extracted text, pages separated by form feeds.
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    pages: Vec<String>,
}

impl TextSource {
    pub fn new(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_SEPARATOR).map(str::to_string).collect();
        // A trailing separator does not start another page.
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    fn page(&self, page: u32) -> Result<&str> {
        let index = usize::try_from(page)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .ok_or(PdfError::InvalidPage(page))?;
        self.pages
            .get(index)
            .map(String::as_str)
            .ok_or(PdfError::InvalidPage(page))
    }
}

impl DocumentSource for TextSource {
    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    fn structural_tables(&mut self, page: u32) -> Result<Vec<RawTable>> {
        self.page(page)?;
        Ok(Vec::new())
    }

    fn plain_text(&mut self, page: u32) -> Result<Option<String>> {
        let text = self.page(page)?;
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source_pages() {
        let mut source = TextSource::new("first page\nline two\x0csecond page\x0c");

        assert_eq!(source.page_count(), 2);
        assert_eq!(source.plain_text(2).unwrap().as_deref(), Some("second page"));
        assert!(source.structural_tables(1).unwrap().is_empty());
        assert!(matches!(source.plain_text(3), Err(PdfError::InvalidPage(3))));
        assert!(matches!(source.plain_text(0), Err(PdfError::InvalidPage(0))));
    }

    #[test]
    fn test_blank_page_has_no_text() {
        let mut source = TextSource::from_pages(["  \n "]);
        assert_eq!(source.plain_text(1).unwrap(), None);
    }

    #[test]
    fn test_page_content_lines() {
        let page = PageContent::from_text(4, Some("a\r\nb\n\nc"));
        assert_eq!(page.number, 4);
        assert_eq!(page.lines, vec!["a", "b", "", "c"]);

        let empty = PageContent::from_text(5, None);
        assert!(empty.lines.is_empty());
    }
}
