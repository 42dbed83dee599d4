//! Plain-text specification report.
//!
//! The report opens with the item table, followed by a table of contents and
//! one page per specification. Pages are separated by a form feed.

use crate::matching::CompiledSpecifications;
use crate::model::Item;
use crate::parsing::values::format_quantity;
use crate::specs::set::SpecSet;

const PAGE_BREAK: &str = "\x0c\n";

// Column widths of the item table, in characters.
const ITEM_WIDTH: usize = 15;
const DESCRIPTION_WIDTH: usize = 50;
const QUANTITY_WIDTH: usize = 10;
const UNIT_WIDTH: usize = 10;

/// Report layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Items shown in the table before the overflow note.
    pub max_table_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { max_table_rows: 15 }
    }
}

/// Output file name for a report of the given specification set.
pub fn file_name(display_name: &str) -> String {
    let stem = display_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_Specifications.txt")
}

/// Render the full report.
pub fn render(
    set: SpecSet,
    items: &[Item],
    specs: &CompiledSpecifications,
    options: &ReportOptions,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Technical Specifications\n", set.display_name()));
    out.push('\n');

    render_items_table(&mut out, items, options.max_table_rows);
    out.push('\n');

    if specs.main_specs.is_empty() {
        out.push_str("No specifications were found for the provided items.\n");
        return out;
    }

    out.push_str("Technical Specifications\n\n");
    render_table_of_contents(&mut out, specs);
    render_sections(&mut out, specs);
    out
}

fn render_items_table(out: &mut String, items: &[Item], max_rows: usize) {
    out.push_str(&format!(
        "{:<iw$}  {:<dw$}  {:>qw$}  {:<uw$}\n",
        "Item Number",
        "Description",
        "Quantity",
        "Unit",
        iw = ITEM_WIDTH,
        dw = DESCRIPTION_WIDTH,
        qw = QUANTITY_WIDTH,
        uw = UNIT_WIDTH,
    ));
    out.push_str(&"-".repeat(ITEM_WIDTH + DESCRIPTION_WIDTH + QUANTITY_WIDTH + UNIT_WIDTH + 6));
    out.push('\n');

    for item in items.iter().take(max_rows) {
        let line = format!(
            "{:<iw$}  {:<dw$}  {:>qw$}  {:<uw$}",
            truncate(&item.item_number, ITEM_WIDTH),
            truncate(&item.description, DESCRIPTION_WIDTH),
            truncate(&format_quantity(&item.quantity), QUANTITY_WIDTH),
            truncate(&item.unit, UNIT_WIDTH),
            iw = ITEM_WIDTH,
            dw = DESCRIPTION_WIDTH,
            qw = QUANTITY_WIDTH,
            uw = UNIT_WIDTH,
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if items.len() > max_rows {
        out.push_str(&format!(
            "+ {} more items (full list in table of contents)\n",
            items.len() - max_rows
        ));
    }
}

fn render_table_of_contents(out: &mut String, specs: &CompiledSpecifications) {
    out.push_str("Table of Contents\n\n");
    for (i, spec) in specs.main_specs.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", i + 1, spec.section, spec.title));
    }

    if !specs.supplemental_specs.is_empty() {
        out.push_str("\nSupplemental Specifications:\n");
        for (i, spec) in specs.supplemental_specs.iter().enumerate() {
            out.push_str(&format!("S{}. {}: {}\n", i + 1, spec.code, spec.title));
        }
    }
}

fn render_sections(out: &mut String, specs: &CompiledSpecifications) {
    for (i, spec) in specs.main_specs.iter().enumerate() {
        out.push_str(PAGE_BREAK);
        out.push_str(&format!("{}. {}: {}\n", i + 1, spec.section, spec.title));
        out.push('\n');
        push_paragraphs(out, &spec.content);
    }

    if specs.supplemental_specs.is_empty() {
        return;
    }

    out.push_str(PAGE_BREAK);
    out.push_str("Supplemental Specifications\n\n");
    for (i, spec) in specs.supplemental_specs.iter().enumerate() {
        out.push_str(&format!("S{}. {}: {}\n", i + 1, spec.code, spec.title));
        out.push('\n');
        push_paragraphs(out, &spec.content);
    }
}

fn push_paragraphs(out: &mut String, content: &str) {
    for paragraph in content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        out.push_str(paragraph);
        out.push_str("\n\n");
    }
}

/// Shorten to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
