use std::path::PathBuf;

use bidspec_core::error::BidspecError;
use bidspec_core::report::{self, ReportOptions};

use crate::{CatalogArgs, InputArgs};

pub fn run(
    input_file: PathBuf,
    input: &InputArgs,
    catalog: &CatalogArgs,
    out_dir: PathBuf,
    max_rows: usize,
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
    let compiled = ctx.compile(&matches)?;

    let options = ReportOptions {
        max_table_rows: max_rows,
    };
    let text = report::render(set, &parsed.items, &compiled, &options);

    std::fs::create_dir_all(&out_dir)?;
    let path = out_dir.join(report::file_name(set.display_name()));
    std::fs::write(&path, text)?;
    eprintln!(
        "Report with {} specification(s) and {} supplemental(s) written to {}",
        compiled.main_specs.len(),
        compiled.supplemental_specs.len(),
        path.display()
    );

    Ok(())
}
