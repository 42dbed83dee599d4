use std::path::PathBuf;

use bidspec_core::error::BidspecError;

use crate::output;
use crate::{CatalogArgs, InputArgs};

pub fn run(
    input_file: PathBuf,
    input: &InputArgs,
    catalog: &CatalogArgs,
    output_format: &str,
) -> Result<(), BidspecError> {
    let set = input.spec_set()?;
    let parsed = super::read_items(&input_file, input)?;
    super::report_diagnostics(&parsed);

    if parsed.items.is_empty() {
        eprintln!("No items found");
        return Ok(());
    }
    eprintln!("Found {} items", parsed.items.len());

    let mut ctx = super::open_context(set, catalog);
    let matches = ctx.match_items(&parsed.items)?;

    match output_format {
        "json" => output::json::print(&matches)?,
        _ => output::table::print_matches(&parsed.items, &matches),
    }

    Ok(())
}
