use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::error::ExtractError;
use crate::models::{CellValue, Table};

/// Extract the first sheet of an XLSX or XLS workbook as a table
///
/// Rows keep document order and the first row becomes the header. Rows with
/// no content at all are dropped; other sheets are ignored.
pub fn extract_spreadsheet(bytes: &[u8]) -> Result<Table, ExtractError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ExtractError::Spreadsheet(e.to_string()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ExtractError::Spreadsheet(e.to_string()))?,
        None => return Err(ExtractError::Empty),
    };

    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row: &Vec<CellValue>| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(Table::from_rows(rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        other => CellValue::DateTime(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::xlsx_bytes;

    #[test]
    fn test_first_row_is_header() {
        let bytes = xlsx_bytes(&[&["Name", "Amount"], &["Coffee", "5"], &["Tea", "3"]]);
        let table = extract_spreadsheet(&bytes).unwrap();
        assert_eq!(table.header, vec![CellValue::from("Name"), CellValue::from("Amount")]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0].to_string(), "Coffee");
        assert_eq!(table.rows[0][1].to_string(), "5");
        assert_eq!(table.rows[1][0].to_string(), "Tea");
    }

    #[test]
    fn test_not_a_workbook() {
        assert!(matches!(
            extract_spreadsheet(b"nope"),
            Err(ExtractError::Spreadsheet(_))
        ));
    }
}
