//! Bank statement table extraction.

mod parser;
pub mod rules;

pub use parser::{BankStatementParser, StatementParse};
