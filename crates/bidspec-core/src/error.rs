use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BidspecError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("document contains no pages")]
    EmptyDocument,

    #[error("failed to read text content of page {page}: {reason}")]
    PageText { page: usize, reason: String },

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("could not identify item number field in the data")]
    MissingItemNumberField,

    #[error("unsupported input file: {0}. Expected .csv, .xlsx or .pdf")]
    UnsupportedInput(String),

    #[error("unknown specification set '{0}'. Known sets: ladotd-2016, txdot-2024")]
    UnknownSpecSet(String),

    #[error("failed to load specification data from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid specification catalog: {0}")]
    CatalogInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
