//! Knowledge ingestion: line tagging and batch extraction.

pub mod ingest;
pub mod tagger;
pub mod types;

pub use ingest::extract;
pub use types::{KnowledgeItem, SourceType, Tag};
