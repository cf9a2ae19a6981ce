//! Page driver running the extraction tiers in priority order.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::columns::WhitespaceInferencer;
use crate::error::{ExtractionError, Result};
use crate::models::config::{ExtractionConfig, ExtractionMethod, FailurePolicy, TabrecConfig};
use crate::models::table::{
    ExtractionOutcome, PageError, PageReport, PageTables, RawTable, Table, Tier,
};
use crate::pdf::{self, DocumentSource, PageContent};
use crate::sanitize::sanitize;
use crate::statement::BankStatementParser;
use crate::statement::rules::LineClassifier;

/// Trait for text-based extraction tiers.
pub trait TableExtractor {
    /// The tier this extractor implements.
    fn tier(&self) -> Tier;

    /// Build a table from the lines of one page, `None` when nothing matched.
    fn extract(&self, lines: &[String]) -> Option<RawTable>;
}

/// Table reconstruction engine.
pub struct TableEngine {
    method: ExtractionMethod,
    failure_policy: FailurePolicy,
    max_pages: usize,
    statement: BankStatementParser,
    whitespace: WhitespaceInferencer,
}

impl TableEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::from_config(&TabrecConfig::default())
    }

    pub fn from_config(config: &TabrecConfig) -> Self {
        let ExtractionConfig {
            method,
            failure_policy,
            noise_markers,
            whitespace,
        } = &config.extraction;

        let classifier = LineClassifier::new().with_markers(noise_markers.iter().cloned());

        Self {
            method: *method,
            failure_policy: *failure_policy,
            max_pages: config.pdf.max_pages,
            statement: BankStatementParser::new().with_classifier(classifier),
            whitespace: WhitespaceInferencer::from_config(whitespace),
        }
    }

    /// Restrict the engine to one tier, or the full cascade.
    pub fn with_method(mut self, method: ExtractionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set document-layer failure handling.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the page limit (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn uses_structural(&self) -> bool {
        matches!(
            self.method,
            ExtractionMethod::Automatic | ExtractionMethod::Structural
        )
    }

    /// Text tiers enabled by the method, in priority order.
    fn text_tiers(&self) -> Vec<&dyn TableExtractor> {
        match self.method {
            ExtractionMethod::Automatic => {
                vec![&self.statement as &dyn TableExtractor, &self.whitespace]
            }
            ExtractionMethod::BankStatement => vec![&self.statement as &dyn TableExtractor],
            ExtractionMethod::Whitespace => vec![&self.whitespace as &dyn TableExtractor],
            ExtractionMethod::Structural => Vec::new(),
        }
    }

    /// Run the text tiers over one page's lines. The first tier with a
    /// result wins.
    pub fn extract_lines(&self, page: &PageContent) -> Option<PageTables> {
        if page.lines.is_empty() {
            return None;
        }

        self.text_tiers().into_iter().find_map(|extractor| {
            let table = extractor.extract(&page.lines)?;
            debug!(
                "Page {}: {} tier produced {} rows",
                page.number,
                extractor.tier(),
                table.len()
            );
            Some(PageTables {
                page: page.number,
                tier: extractor.tier(),
                tables: vec![table],
            })
        })
    }

    /// Run the tier cascade for one page.
    pub fn extract_page(
        &self,
        source: &mut dyn DocumentSource,
        page: u32,
    ) -> pdf::Result<Option<PageTables>> {
        if self.uses_structural() {
            let tables = source.structural_tables(page)?;
            if !tables.is_empty() {
                info!("Page {}: found {} tables (structural)", page, tables.len());
                return Ok(Some(PageTables {
                    page,
                    tier: Tier::Structural,
                    tables,
                }));
            }
            debug!("Page {}: no structural tables, trying text tiers", page);
        }

        if self.text_tiers().is_empty() {
            return Ok(None);
        }

        let text = source.plain_text(page)?;
        let content = PageContent::from_text(page, text.as_deref());
        let found = self.extract_lines(&content);

        match &found {
            Some(tables) => info!("Page {}: table found using {} tier", page, tables.tier),
            None => debug!("Page {}: no tier produced a table", page),
        }

        Ok(found)
    }

    /// Extract and sanitize tables from every page of a document.
    ///
    /// Under [`FailurePolicy::Abort`] a document-layer error abandons the
    /// job: the outcome carries no tables even if earlier pages had some.
    pub fn extract_document(&self, source: &mut dyn DocumentSource) -> ExtractionOutcome {
        let start = Instant::now();
        let page_count = source.page_count();
        let limit = if self.max_pages == 0 {
            page_count
        } else {
            page_count.min(u32::try_from(self.max_pages).unwrap_or(u32::MAX))
        };

        let mut collected: Vec<PageTables> = Vec::new();
        let mut pages = Vec::with_capacity(limit as usize);
        let mut errors = Vec::new();

        for page in 1..=limit {
            info!("Page {}/{}", page, limit);

            match self.extract_page(source, page) {
                Ok(Some(found)) => {
                    pages.push(PageReport {
                        page,
                        tier: Some(found.tier),
                        tables: found.tables.len(),
                    });
                    collected.push(found);
                }
                Ok(None) => pages.push(PageReport {
                    page,
                    tier: None,
                    tables: 0,
                }),
                Err(e) => {
                    let page_error = PageError {
                        page,
                        message: e.to_string(),
                    };
                    match self.failure_policy {
                        FailurePolicy::Abort => {
                            error!("Page {}: {}; abandoning document", page, e);
                            return ExtractionOutcome::failed(page_error);
                        }
                        FailurePolicy::Isolate => {
                            warn!("Page {}: {}; skipping page", page, e);
                            errors.push(page_error);
                        }
                    }
                }
            }
        }

        let tables: Vec<Table> = collected
            .iter()
            .flat_map(|found| found.tables.iter())
            .filter(|raw| !raw.is_empty())
            .map(sanitize)
            .collect();

        if tables.is_empty() {
            warn!("No tables extracted");
        } else {
            info!(
                "Extracted {} tables from {} pages in {}ms",
                tables.len(),
                limit,
                start.elapsed().as_millis()
            );
        }

        ExtractionOutcome {
            success: !tables.is_empty(),
            tables,
            pages,
            errors,
        }
    }

    /// [`extract_document`](Self::extract_document) with a failed pass
    /// turned into an error: the abandoning page's error under
    /// [`FailurePolicy::Abort`], otherwise [`ExtractionError::NoTables`].
    pub fn run(&self, source: &mut dyn DocumentSource) -> Result<ExtractionOutcome> {
        let outcome = self.extract_document(source);
        if outcome.success {
            return Ok(outcome);
        }

        match (self.failure_policy, outcome.errors.into_iter().next()) {
            (FailurePolicy::Abort, Some(PageError { page, message })) => {
                Err(ExtractionError::Source { page, message }.into())
            }
            _ => Err(ExtractionError::NoTables.into()),
        }
    }
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new()
    }
}
