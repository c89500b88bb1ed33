use std::path::Path;

use tracing::{info, warn};

use crate::resume::catalog::Catalog;
use crate::resume::document::extract_text;
use crate::resume::extractor::extract_category;
use crate::resume::record::ExtractionRecord;
use crate::resume::ParseError;

/// Orchestrates one parse: text extraction once, then every category over the same text.
///
/// Cheap to copy; all state lives in the process-wide `Catalog`.
#[derive(Debug, Clone, Copy)]
pub struct ResumeParser {
    catalog: &'static Catalog,
}

impl ResumeParser {
    /// Compiles the catalog if this is the first parser in the process.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(ResumeParser {
            catalog: Catalog::global()?,
        })
    }

    /// Parses the document at `path`. Unsupported formats and unreadable files are the only
    /// errors; the file itself is never modified or removed.
    pub fn parse(&self, path: &Path) -> Result<ExtractionRecord, ParseError> {
        let text = extract_text(path)?;
        let record = self.parse_text(&text);
        if record.is_empty() {
            warn!("No fields extracted from {}", path.display());
        }
        info!(
            "Parsed {}: {} items across {} chars",
            path.display(),
            record.total_items(),
            text.len()
        );
        Ok(record)
    }

    /// Runs all six category extractors over `text`. Never fails.
    pub fn parse_text(&self, text: &str) -> ExtractionRecord {
        let mut record = ExtractionRecord::default();
        for category in &self.catalog.categories {
            let items = extract_category(text, category, self.catalog);
            record.set(category.spec.category, items);
        }
        record
    }
}
