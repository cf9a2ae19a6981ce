//! Rule-based line extractors for bank statements.

pub mod amounts;
pub mod metadata;
pub mod noise;
pub mod patterns;
pub mod transactions;

pub use amounts::{format_amount, parse_amount, parse_balance};
pub use metadata::{MetadataExtractor, StatementMetadata};
pub use noise::{DEFAULT_NOISE_MARKERS, LineClassifier};
pub use transactions::{FieldLayout, TransactionMatcher, TransactionRule, is_credit_description};
