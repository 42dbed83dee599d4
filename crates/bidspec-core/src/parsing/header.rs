use serde::{Deserialize, Serialize};

use crate::parsing::rows::Row;

const ITEM_KEYWORDS: &[&str] = &["item"];
const DESCRIPTION_KEYWORDS: &[&str] = &["description", "desc"];
const QUANTITY_KEYWORDS: &[&str] = &["quantity", "qty"];
const UNIT_KEYWORDS: &[&str] = &["unit"];

// Per-cell needles used once the header row is known.
const ITEM_CELL: &[&str] = &["item"];
const DESCRIPTION_CELL: &[&str] = &["desc"];
const QUANTITY_CELL: &[&str] = &["quant", "qty"];
const UNIT_CELL: &[&str] = &["unit"];

/// Column index of each logical item field within a row.
///
/// `None` marks a field the header did not name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub item_number: Option<usize>,
    pub description: Option<usize>,
    pub quantity: Option<usize>,
    pub unit: Option<usize>,
}

impl ColumnMap {
    /// Positional layout used for unnamed fields and for pages without a header:
    /// item number, description, unit, quantity.
    pub fn positional() -> Self {
        ColumnMap {
            item_number: Some(0),
            description: Some(1),
            unit: Some(2),
            quantity: Some(3),
        }
    }

    /// Fill every unresolved field from `fallback`.
    pub fn or(self, fallback: &ColumnMap) -> ColumnMap {
        ColumnMap {
            item_number: self.item_number.or(fallback.item_number),
            description: self.description.or(fallback.description),
            quantity: self.quantity.or(fallback.quantity),
            unit: self.unit.or(fallback.unit),
        }
    }
}

/// Check whether a row's joined text names the item table columns.
///
/// A unit column is optional unless `require_unit` is set.
pub fn is_header_row(cells: &[&str], require_unit: bool) -> bool {
    let joined = cells
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let has = |keywords: &[&str]| keywords.iter().any(|kw| joined.contains(kw));

    has(ITEM_KEYWORDS)
        && has(DESCRIPTION_KEYWORDS)
        && has(QUANTITY_KEYWORDS)
        && (!require_unit || has(UNIT_KEYWORDS))
}

/// Assign each logical field to the first header cell that names it.
pub fn locate_columns(cells: &[&str]) -> ColumnMap {
    let lower: Vec<String> = cells.iter().map(|c| c.trim().to_lowercase()).collect();
    let first = |needles: &[&str]| {
        lower
            .iter()
            .position(|cell| needles.iter().any(|n| cell.contains(n)))
    };

    ColumnMap {
        item_number: first(ITEM_CELL),
        description: first(DESCRIPTION_CELL),
        quantity: first(QUANTITY_CELL),
        unit: first(UNIT_CELL),
    }
}

/// Find the first header row on a page and map its columns.
pub fn find_header(rows: &[Row], require_unit: bool) -> Option<(usize, ColumnMap)> {
    rows.iter().enumerate().find_map(|(i, row)| {
        let cells = row.cells();
        if is_header_row(&cells, require_unit) {
            let columns = locate_columns(&cells);
            log::debug!("header row {} found: {:?} -> {:?}", i, cells, columns);
            Some((i, columns))
        } else {
            None
        }
    })
}
