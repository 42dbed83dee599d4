use std::path::PathBuf;

use bidspec_core::error::BidspecError;

use crate::output;
use crate::InputArgs;

pub fn run(
    input_file: PathBuf,
    input: &InputArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), BidspecError> {
    let parsed = super::read_items(&input_file, input)?;

    let output_str = match output_format {
        "json" => serde_json::to_string_pretty(&parsed)?,
        _ => output::table::format_items(&parsed.items),
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} item(s), written to {}",
                parsed.items.len(),
                path.display()
            );
        }
        None => {
            println!("{output_str}");
        }
    }
    super::report_diagnostics(&parsed);

    Ok(())
}
