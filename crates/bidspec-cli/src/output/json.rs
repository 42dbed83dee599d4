use bidspec_core::error::BidspecError;
use bidspec_core::SpecificationMatch;

pub fn print(matches: &[SpecificationMatch]) -> Result<(), BidspecError> {
    let json = serde_json::to_string_pretty(matches)?;
    println!("{json}");
    Ok(())
}
