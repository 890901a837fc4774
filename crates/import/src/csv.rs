use serde::Deserialize;

use crate::{ImportError, ImportFormat, Importer, StockEntry};

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    total_copies: u32,
}

/// Comma-separated rows under a `title,total_copies` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvImporter;

impl Importer for CsvImporter {
    fn format(&self) -> ImportFormat {
        ImportFormat::Csv
    }

    fn parse(&self, payload: &str) -> Result<Vec<StockEntry>, ImportError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(payload.as_bytes());

        let mut entries = Vec::new();
        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row?;
            entries.push(StockEntry::validated(index + 1, &row.title, row.total_copies)?);
        }
        Ok(entries)
    }
}
