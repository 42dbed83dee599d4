use std::io::Cursor;

use calamine::{Reader, Xlsx};

use crate::error::BidspecError;
use crate::extraction::FlatTable;

/// Read a delimited text file whose first record is the header row.
///
/// Records may have fewer or more cells than the header; blank records are skipped.
pub fn read_csv(bytes: &[u8]) -> Result<FlatTable, BidspecError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BidspecError::ParseError(format!("failed to read csv header: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            BidspecError::ParseError(format!("failed to read csv record {}: {e}", i + 1))
        })?;
        let row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        if row.iter().any(|c| !c.is_empty()) {
            rows.push(row);
        }
    }

    Ok(FlatTable { headers, rows })
}

/// Read the first worksheet of an xlsx workbook. Row 1 is the header row.
pub fn read_xlsx(bytes: &[u8]) -> Result<FlatTable, BidspecError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| BidspecError::ParseError(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BidspecError::ParseError("workbook has no worksheets".into()))?
        .map_err(|e| BidspecError::ParseError(format!("failed to read first worksheet: {e}")))?;

    let mut all_rows = sheet
        .rows()
        .map(|row| row.iter().map(cell_as_string).collect::<Vec<_>>());

    let headers = all_rows.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = all_rows
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    if headers.is_empty() || rows.is_empty() {
        return Err(BidspecError::ParseError(
            "Excel file contains insufficient data".into(),
        ));
    }

    Ok(FlatTable { headers, rows })
}

fn cell_as_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::String(s) => s.trim().to_string(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}
