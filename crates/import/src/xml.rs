use serde::Deserialize;

use crate::{ImportError, ImportFormat, Importer, StockEntry};

const DEFAULT_COPIES: u32 = 1;

#[derive(Debug, Deserialize)]
struct XmlCatalog {
    #[serde(rename = "book", default)]
    books: Vec<XmlBook>,
}

#[derive(Debug, Deserialize)]
struct XmlBook {
    title: String,
    #[serde(default = "default_copies")]
    total_copies: u32,
}

fn default_copies() -> u32 {
    DEFAULT_COPIES
}

/// `<books><book><title/><total_copies/></book>...</books>` documents.
///
/// A `<book>` without `<total_copies>` counts as a single copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlImporter;

impl Importer for XmlImporter {
    fn format(&self) -> ImportFormat {
        ImportFormat::Xml
    }

    fn parse(&self, payload: &str) -> Result<Vec<StockEntry>, ImportError> {
        let catalog: XmlCatalog = quick_xml::de::from_str(payload.trim())?;
        catalog
            .books
            .iter()
            .enumerate()
            .map(|(index, book)| StockEntry::validated(index + 1, &book.title, book.total_copies))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_books_with_and_without_counts() {
        let payload = r#"
            <books>
                <book><title>Dune</title><total_copies>4</total_copies></book>
                <book><title>Hobbit</title></book>
            </books>
        "#;

        let entries = XmlImporter.parse(payload).unwrap();
        assert_eq!(
            entries,
            vec![
                StockEntry {
                    title: "Dune".to_string(),
                    count: 4
                },
                StockEntry {
                    title: "Hobbit".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn empty_catalog_has_no_entries() {
        assert!(XmlImporter.parse("<books></books>").unwrap().is_empty());
    }

    #[test]
    fn book_without_title_is_malformed() {
        let err = XmlImporter
            .parse("<books><book><total_copies>2</total_copies></book></books>")
            .unwrap_err();
        assert!(matches!(err, ImportError::Xml(_)));
    }
}
