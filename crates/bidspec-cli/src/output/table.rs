use bidspec_core::parsing::values::format_quantity;
use bidspec_core::{Item, SpecificationMatch};

pub fn format_items(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found".into();
    }

    let item_width = column_width(items.iter().map(|i| i.item_number.as_str()), "Item Number");
    let desc_width = column_width(items.iter().map(|i| i.description.as_str()), "Description");

    let mut out = String::new();
    out.push_str(&format!(
        "{:<iw$}  {:<dw$}  {:>12}  {}\n",
        "Item Number",
        "Description",
        "Quantity",
        "Unit",
        iw = item_width,
        dw = desc_width
    ));
    out.push_str(&format!("{}\n", "-".repeat(item_width + desc_width + 24)));

    for item in items {
        out.push_str(&format!(
            "{:<iw$}  {:<dw$}  {:>12}  {}\n",
            item.item_number,
            item.description,
            format_quantity(&item.quantity),
            item.unit,
            iw = item_width,
            dw = desc_width
        ));
    }

    out.push_str(&format!("\n{} item(s)", items.len()));
    out
}

pub fn print_matches(items: &[Item], matches: &[SpecificationMatch]) {
    let item_width = column_width(matches.iter().map(|m| m.item_number.as_str()), "Item Number");

    println!("{:<width$}  Specification", "Item Number", width = item_width);
    println!("{}", "-".repeat(item_width + 40));

    for (item, m) in items.iter().zip(matches) {
        println!(
            "{:<width$}  {}",
            item.item_number,
            m.spec_reference,
            width = item_width
        );
        if !m.supplemental_refs.is_empty() {
            let codes: Vec<&str> = m.supplemental_refs.iter().map(|s| s.code.as_str()).collect();
            println!("{:<width$}    supplementals: {}", "", codes.join(", "), width = item_width);
        }
    }

    let found = matches.iter().filter(|m| m.is_found()).count();
    println!();
    println!("{} of {} item(s) matched", found, matches.len());
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}
