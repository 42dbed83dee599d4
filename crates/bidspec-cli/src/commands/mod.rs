pub mod extract;
pub mod match_items;
pub mod report;
pub mod sets;

use std::path::Path;

use bidspec_core::error::BidspecError;
use bidspec_core::extraction::pdftotext::PdftotextDecoder;
use bidspec_core::specs::builtin::BundledCatalogs;
use bidspec_core::specs::set::SpecSet;
use bidspec_core::specs::{CatalogSource, DirCatalogSource};
use bidspec_core::{ParsedItems, SpecContext};

use crate::{CatalogArgs, InputArgs};

/// Read the items of a bid schedule with the options given on the command line.
fn read_items(input_file: &Path, input: &InputArgs) -> Result<ParsedItems, BidspecError> {
    let set = input.spec_set()?;
    let decoder = PdftotextDecoder::new();
    bidspec_core::read_items_file(input_file, set, &input.extract_options(), &decoder)
}

/// Print parse warnings and skipped pages to stderr.
fn report_diagnostics(parsed: &ParsedItems) {
    for w in &parsed.warnings {
        match w.page_number {
            Some(page) => eprintln!("  warning (page {}): {}", page, w.reason),
            None => eprintln!("  warning: {}", w.reason),
        }
    }
    for skipped in &parsed.skipped_pages {
        eprintln!("  page {} skipped: {}", skipped.page_number, skipped.reason);
    }
}

fn catalog_source(catalog: &CatalogArgs) -> Box<dyn CatalogSource> {
    match &catalog.catalog_dir {
        Some(dir) => Box::new(DirCatalogSource::new(dir)),
        None => Box::new(BundledCatalogs),
    }
}

fn open_context(set: SpecSet, catalog: &CatalogArgs) -> SpecContext {
    SpecContext::new(catalog_source(catalog), set)
}
