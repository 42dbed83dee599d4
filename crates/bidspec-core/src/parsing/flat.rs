//! Standardize spreadsheet-style tables into items.

use crate::error::BidspecError;
use crate::extraction::FlatTable;
use crate::model::{CandidateItem, Item};
use crate::parsing::{ParseWarning, ParsedItems};

const ITEM_NUMBER_FIELDS: &[&str] = &[
    "itemnumber",
    "item number",
    "item_number",
    "item",
    "number",
    "id",
];
const DESCRIPTION_FIELDS: &[&str] = &["description", "desc", "item description", "name"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "qty", "amount", "count"];
const UNIT_FIELDS: &[&str] = &["unit", "units", "unitofmeasure", "unit of measure", "uom"];

/// Lower-case, trim and collapse internal whitespace.
fn normalize_field(field: &str) -> String {
    field
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pick the column for a logical field.
///
/// Candidates are tried in order; for each, the first field equal to or
/// containing it wins. Columns listed in `exclude` are never chosen.
pub fn determine_field(fields: &[String], candidates: &[&str], exclude: &[usize]) -> Option<usize> {
    let normalized: Vec<String> = fields.iter().map(|f| normalize_field(f)).collect();
    candidates.iter().find_map(|candidate| {
        normalized
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude.contains(i))
            .find(|(_, field)| field.as_str() == *candidate || field.contains(candidate))
            .map(|(i, _)| i)
    })
}

/// Map a flat table onto the item schema.
///
/// Rows without an item number get a numbered placeholder and a warning.
pub fn standardize_table(table: &FlatTable) -> Result<ParsedItems, BidspecError> {
    if table.rows.is_empty() {
        return Err(BidspecError::ParseError("no data found in the file".into()));
    }

    let item_col = determine_field(&table.headers, ITEM_NUMBER_FIELDS, &[])
        .ok_or(BidspecError::MissingItemNumberField)?;
    let taken = [item_col];
    let description_col = determine_field(&table.headers, DESCRIPTION_FIELDS, &taken);
    let quantity_col = determine_field(&table.headers, QUANTITY_FIELDS, &taken);
    let unit_col = determine_field(&table.headers, UNIT_FIELDS, &taken);

    log::debug!(
        "flat table columns: item={} description={:?} quantity={:?} unit={:?}",
        item_col,
        description_col,
        quantity_col,
        unit_col
    );

    let value = |row: &[String], col: Option<usize>| {
        col.and_then(|c| row.get(c))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let mut items = Vec::new();
    let mut warnings = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        let mut item_number = value(row.as_slice(), Some(item_col));
        if item_number.is_empty() {
            item_number = format!("Unknown-{}", index + 1);
            log::warn!("row {} has no item number, using {}", index + 1, item_number);
            warnings.push(ParseWarning {
                page_number: None,
                reason: format!("row {} has no item number; recorded as {}", index + 1, item_number),
            });
        }

        let candidate = CandidateItem {
            item_number,
            description: value(row.as_slice(), description_col),
            quantity: value(row.as_slice(), quantity_col),
            unit: value(row.as_slice(), unit_col),
        };
        if let Some(item) = Item::standardize(candidate) {
            items.push(item);
        }
    }

    Ok(ParsedItems {
        items,
        warnings,
        skipped_pages: Vec::new(),
    })
}
