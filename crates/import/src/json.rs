use serde::Deserialize;

use crate::{ImportError, ImportFormat, Importer, StockEntry};

#[derive(Debug, Deserialize)]
struct JsonBook {
    title: String,
    total_copies: u32,
}

/// Array of `{"title": ..., "total_copies": ...}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonImporter;

impl Importer for JsonImporter {
    fn format(&self) -> ImportFormat {
        ImportFormat::Json
    }

    fn parse(&self, payload: &str) -> Result<Vec<StockEntry>, ImportError> {
        let books: Vec<JsonBook> = serde_json::from_str(payload)?;
        books
            .iter()
            .enumerate()
            .map(|(index, book)| StockEntry::validated(index + 1, &book.title, book.total_copies))
            .collect()
    }
}
