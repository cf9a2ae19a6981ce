//! Core library for reconstructing tables from PDF page text.
//!
//! This crate provides:
//! - A document layer (lopdf + pdf-extract, or pre-extracted text)
//! - Bank statement parsing (transactions, header metadata, noise filtering)
//! - Whitespace column inference for aligned text
//! - Table sanitization with upper-case header promotion
//! - A per-page engine running the tiers in priority order

pub mod columns;
pub mod engine;
pub mod error;
pub mod models;
pub mod pdf;
pub mod sanitize;
pub mod statement;

pub use columns::{ColumnBoundarySet, WhitespaceInferencer};
pub use engine::{TableEngine, TableExtractor};
pub use error::{ExtractionError, PdfError, Result, TabrecError};
pub use models::config::{
    ExtractionConfig, ExtractionMethod, FailurePolicy, OutputFormat, TabrecConfig,
};
pub use models::statement::{BalanceSide, MetadataLabel, Transaction};
pub use models::table::{ExtractionOutcome, PageReport, PageTables, RawTable, Table, Tier};
pub use pdf::{DocumentSource, PageContent, PdfExtractor, TextSource};
pub use sanitize::sanitize;
pub use statement::{BankStatementParser, StatementParse};
