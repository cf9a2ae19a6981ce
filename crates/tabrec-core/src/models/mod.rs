//! Data models.

pub mod config;
pub mod statement;
pub mod table;
