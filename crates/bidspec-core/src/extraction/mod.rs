pub mod pdftotext;
pub mod tabular;

use crate::error::BidspecError;
use crate::model::TextFragment;

/// A decoded positioned-text document.
///
/// Pages are numbered from 1. Text retrieval may fail for a single page
/// without invalidating the rest of the document.
pub trait PositionedDocument {
    fn num_pages(&self) -> usize;

    /// Positioned text fragments of one page, in no guaranteed order.
    fn text_content(&self, page_number: usize) -> Result<Vec<TextFragment>, BidspecError>;
}

/// Trait for PDF decoding backends.
pub trait PdfDecoder: Send + Sync {
    /// Decode PDF bytes into a positioned-text document.
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PositionedDocument>, BidspecError>;

    /// Name of this decoding backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// A well-formed table read from a delimited file or a spreadsheet.
///
/// `headers` is the first row; `rows` holds the remaining rows with cells as text.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
