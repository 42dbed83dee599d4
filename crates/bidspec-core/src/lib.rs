pub mod error;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod report;
pub mod specs;

use std::path::Path;

use error::BidspecError;
use extraction::{PdfDecoder, PositionedDocument};
use specs::set::SpecSet;

pub use matching::{CompiledSpecifications, SpecContext, SpecificationMatch};
pub use model::Item;
pub use parsing::{ExtractOptions, ParsedItems};

/// Main API entry point: decode a PDF bid schedule and extract its items.
///
/// Decoder failures and zero-page documents are fatal. Pages whose text
/// cannot be read are skipped and listed in [`ParsedItems::skipped_pages`].
pub fn extract_items_from_pdf(
    pdf_bytes: &[u8],
    decoder: &dyn PdfDecoder,
    set: SpecSet,
    options: &ExtractOptions,
) -> Result<ParsedItems, BidspecError> {
    let document = decoder.open(pdf_bytes)?;
    if document.num_pages() == 0 {
        return Err(BidspecError::EmptyDocument);
    }
    log::debug!(
        "decoded {} page(s) with {}",
        document.num_pages(),
        decoder.backend_name()
    );
    Ok(extract_items(document.as_ref(), set, options))
}

/// Extract items from an already decoded document, in page then row order.
pub fn extract_items(
    document: &dyn PositionedDocument,
    set: SpecSet,
    options: &ExtractOptions,
) -> ParsedItems {
    parsing::extract_items(document, set, options)
}

/// Read items from a `.csv`, `.xlsx` or `.pdf` file.
pub fn read_items_file(
    path: &Path,
    set: SpecSet,
    options: &ExtractOptions,
    decoder: &dyn PdfDecoder,
) -> Result<ParsedItems, BidspecError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let read = || std::fs::read(path);
    match extension.as_str() {
        "csv" => {
            let table = extraction::tabular::read_csv(&read()?)?;
            parsing::flat::standardize_table(&table)
        }
        "xlsx" => {
            let table = extraction::tabular::read_xlsx(&read()?)?;
            parsing::flat::standardize_table(&table)
        }
        "pdf" => extract_items_from_pdf(&read()?, decoder, set, options),
        _ => Err(BidspecError::UnsupportedInput(path.display().to_string())),
    }
}
