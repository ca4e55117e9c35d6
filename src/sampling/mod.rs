pub mod extractor;
pub mod grid;
