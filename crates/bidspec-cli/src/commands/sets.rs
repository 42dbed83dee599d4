use bidspec_core::error::BidspecError;
use bidspec_core::matching::available_sets;
use bidspec_core::specs::set::{Resolution, SpecSet};

use crate::CatalogArgs;

pub fn list() -> Result<(), BidspecError> {
    println!("Available specification sets:\n");
    for (id, name) in available_sets() {
        println!("  {:<12} {}", id, name);
    }
    println!();
    Ok(())
}

pub fn explain(id: &str, catalog: &CatalogArgs) -> Result<(), BidspecError> {
    let set = SpecSet::from_id(id)?;

    println!("{} ({})\n", set.display_name(), set.id());

    println!("Item numbers must match one of:\n");
    for pattern in set.item_number_patterns() {
        println!("  {}", pattern.as_str());
    }
    println!();

    match set.resolution() {
        Resolution::Prefix(n) => println!(
            "Items without an exact catalog entry use the first entry sharing their first {} characters.",
            n
        ),
        Resolution::BeforeDecimal => println!(
            "Items without an exact catalog entry use the entry matching the part before the decimal point."
        ),
    }
    println!();

    let mut ctx = super::open_context(set, catalog);
    let source = ctx.describe_source();
    let cat = ctx.load_catalog(set)?;
    println!(
        "Catalog ({}): {} specification(s), {} supplemental(s)\n",
        source,
        cat.specifications.len(),
        cat.supplementals.len()
    );

    let width = cat
        .specifications
        .iter()
        .map(|s| s.item_number.len())
        .max()
        .unwrap_or(10);
    for spec in &cat.specifications {
        println!(
            "  {:<width$}  {}",
            spec.item_number,
            spec.reference(),
            width = width
        );
    }
    println!();

    Ok(())
}
