pub mod flat;
pub mod header;
pub mod rows;
pub mod values;

use serde::{Deserialize, Serialize};

use crate::extraction::PositionedDocument;
use crate::model::{CandidateItem, Item, TextFragment};
use crate::specs::set::SpecSet;
use header::{find_header, ColumnMap};
use rows::{cluster_rows, ClusterConfig, Row};

/// Tunables for PDF item extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    pub cluster: ClusterConfig,
    /// Only accept header rows that also name a unit column.
    pub require_unit_header: bool,
    /// Rows with fewer fragments are never read as items.
    pub min_row_fragments: usize,
    /// Column layout for fields a header leaves unnamed and for pages without a header.
    pub positional_columns: ColumnMap,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            cluster: ClusterConfig::default(),
            require_unit_header: false,
            min_row_fragments: 2,
            positional_columns: ColumnMap::positional(),
        }
    }
}

/// A non-fatal note produced while reading items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
    pub reason: String,
}

/// A page whose text could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPage {
    pub page_number: usize,
    pub reason: String,
}

/// Standardized items read from one input document.
///
/// Zero items is a valid result; the caller decides how to report it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedItems {
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_pages: Vec<SkippedPage>,
}

/// How item rows are located on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// Rows after the header, read through the header's column map.
    Header { row_index: usize, columns: ColumnMap },
    /// No header on the page: every row, read by position.
    Positional,
}

/// Decide how a page's rows are read.
pub fn detect_layout(rows: &[Row], options: &ExtractOptions) -> TableLayout {
    match find_header(rows, options.require_unit_header) {
        Some((row_index, columns)) => TableLayout::Header {
            row_index,
            columns: columns.or(&options.positional_columns),
        },
        None => TableLayout::Positional,
    }
}

/// Read candidate items from one page's clustered rows, in row order.
///
/// The header row itself is never emitted. Rows whose item-number cell is
/// outside the grammar of `set` are skipped.
pub fn extract_rows(rows: &[Row], set: SpecSet, options: &ExtractOptions) -> Vec<CandidateItem> {
    read_rows(rows, detect_layout(rows, options), set, options)
}

fn read_rows(
    rows: &[Row],
    layout: TableLayout,
    set: SpecSet,
    options: &ExtractOptions,
) -> Vec<CandidateItem> {
    let (data_rows, columns) = match layout {
        TableLayout::Header { row_index, columns } => (&rows[row_index + 1..], columns),
        TableLayout::Positional => {
            log::debug!("no header row found, reading columns by position");
            (rows, options.positional_columns)
        }
    };

    data_rows
        .iter()
        .filter_map(|row| read_row(row, &columns, set, options.min_row_fragments))
        .collect()
}

/// Cluster one page's fragments and read its candidate items.
pub fn extract_page(
    fragments: &[TextFragment],
    set: SpecSet,
    options: &ExtractOptions,
) -> Vec<CandidateItem> {
    let rows = cluster_rows(fragments, &options.cluster);
    extract_rows(&rows, set, options)
}

fn read_row(
    row: &Row,
    columns: &ColumnMap,
    set: SpecSet,
    min_fragments: usize,
) -> Option<CandidateItem> {
    if row.len() < min_fragments {
        return None;
    }

    let cells = row.cells();
    let item_number = cell(&cells, columns.item_number);
    if !set.is_valid_item_number(item_number) {
        return None;
    }

    Some(CandidateItem {
        item_number: item_number.to_string(),
        description: cell(&cells, columns.description).to_string(),
        quantity: cell(&cells, columns.quantity).to_string(),
        unit: cell(&cells, columns.unit).to_string(),
    })
}

/// Cell at `index`, or empty when the row is shorter.
fn cell<'a>(cells: &[&'a str], index: Option<usize>) -> &'a str {
    index.and_then(|i| cells.get(i)).copied().unwrap_or("")
}

/// Extract items from every page of a document, in page order.
///
/// A page whose text cannot be retrieved is recorded and skipped; it never
/// aborts the remaining pages.
pub fn extract_items(
    document: &dyn PositionedDocument,
    set: SpecSet,
    options: &ExtractOptions,
) -> ParsedItems {
    let mut candidates = Vec::new();
    let mut warnings = Vec::new();
    let mut skipped_pages = Vec::new();

    for page_number in 1..=document.num_pages() {
        let fragments = match document.text_content(page_number) {
            Ok(fragments) => fragments,
            Err(e) => {
                log::warn!("skipping page {}: {}", page_number, e);
                skipped_pages.push(SkippedPage {
                    page_number,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let rows = cluster_rows(&fragments, &options.cluster);
        let layout = detect_layout(&rows, options);
        let page_items = read_rows(&rows, layout, set, options);
        if layout == TableLayout::Positional && !page_items.is_empty() {
            warnings.push(ParseWarning {
                page_number: Some(page_number),
                reason: "no header row found; columns read by position".into(),
            });
        }

        log::debug!("page {}: {} candidate item(s)", page_number, page_items.len());
        candidates.extend(page_items);
    }

    let items = standardize(candidates);
    log::info!(
        "extracted {} item(s) from {} page(s)",
        items.len(),
        document.num_pages()
    );

    ParsedItems {
        items,
        warnings,
        skipped_pages,
    }
}

/// Trim candidates and drop those without a usable item number.
pub fn standardize(candidates: Vec<CandidateItem>) -> Vec<Item> {
    candidates.into_iter().filter_map(Item::standardize).collect()
}
