//! Catalogue ingestion: fetching endpoints and flattening their trees

pub mod source_selector;
pub mod tree_extractor;

pub use source_selector::{CatalogueIngestor, SourceSelection};
pub use tree_extractor::TreeExtractor;
