//! Stock importers.
//!
//! Every format is parsed into the same normalized [`StockEntry`] sequence,
//! which callers feed into the catalog one `add_book` at a time. Nothing here
//! touches catalog state.

mod csv;
mod error;
mod json;
mod xml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use self::csv::CsvImporter;
pub use self::error::ImportError;
pub use self::json::JsonImporter;
pub use self::xml::XmlImporter;

/// One `(title, count)` pair ready for `add_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub title: String,
    pub count: u32,
}

impl StockEntry {
    /// Validate a raw entry found at 1-based `position` in its payload.
    pub(crate) fn validated(position: usize, title: &str, count: u32) -> Result<Self, ImportError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ImportError::InvalidEntry {
                position,
                reason: "title is blank".to_string(),
            });
        }
        if count == 0 {
            return Err(ImportError::InvalidEntry {
                position,
                reason: format!("'{title}' has total_copies 0; expected a positive count"),
            });
        }

        Ok(Self {
            title: title.to_string(),
            count,
        })
    }
}

impl From<StockEntry> for (String, u32) {
    fn from(entry: StockEntry) -> Self {
        (entry.title, entry.count)
    }
}

/// Parser for one payload format.
pub trait Importer {
    fn format(&self) -> ImportFormat;

    fn parse(&self, payload: &str) -> Result<Vec<StockEntry>, ImportError>;
}

/// Supported payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportFormat {
    Json,
    Xml,
    Csv,
}

impl ImportFormat {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| ImportError::UnknownExtension(path.to_path_buf()))
    }

    pub fn importer(self) -> Box<dyn Importer> {
        match self {
            Self::Json => Box::new(JsonImporter),
            Self::Xml => Box::new(XmlImporter),
            Self::Csv => Box::new(CsvImporter),
        }
    }
}

impl FromStr for ImportFormat {
    type Err = ImportError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "csv" => Ok(Self::Csv),
            _ => Err(ImportError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Read and parse a stock file. Without an explicit `format` the file
/// extension decides.
pub fn read_file(path: &Path, format: Option<ImportFormat>) -> Result<Vec<StockEntry>, ImportError> {
    let format = match format {
        Some(format) => format,
        None => ImportFormat::from_path(path)?,
    };

    let payload = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = format.importer().parse(&payload)?;
    tracing::info!(
        target: "shelf-import",
        path = %path.display(),
        %format,
        entries = entries.len(),
        "stock file parsed"
    );
    Ok(entries)
}
