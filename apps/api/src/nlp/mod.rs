// Document ingestion: parsing, normalization, entity extraction, embedding.
// The embedding model itself is remote; everything else here is pure.

pub mod cleaner;
pub mod embedder;
pub mod extractor;
pub mod parser;
