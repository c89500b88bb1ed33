// Résumé field extraction
// Implements: text extraction, section discovery, per-category two-tier extraction.
// Parsing is CPU-bound and synchronous; HTTP callers must run it inside tokio::task::spawn_blocking.

pub mod catalog;
pub mod document;
pub mod docx;
pub mod extractor;
pub mod handlers;
pub mod parser;
pub mod record;
pub mod sections;
pub mod sentences;

use std::path::PathBuf;

use thiserror::Error;

pub use parser::ResumeParser;

/// The only failures that escape the parser.
/// Everything that goes wrong inside a single category degrades to an empty list instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
