// src/xlsx_handler.rs
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use crate::data_types::TableData;
use crate::error::{LoadError, LoadResult};

pub struct XlsxHandler {}

impl XlsxHandler {
    /// Read one sheet of an in-memory workbook as rows of strings.
    ///
    /// `sheet` picks a sheet by name; `None` or an empty name means the first
    /// sheet in workbook order. The first row is data like any other, and each
    /// row ends at its last filled cell.
    pub fn read_sheet(bytes: Vec<u8>, sheet: Option<&str>) -> LoadResult<TableData> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let sheet_names = workbook.sheet_names();
        debug!(?sheet_names, requested = ?sheet, "opened workbook");

        let sheet_name = Self::select_sheet(&sheet_names, sheet)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|row| {
                // calamine pads every row to the range width
                let filled = row
                    .iter()
                    .rposition(|cell| !matches!(cell, Data::Empty))
                    .map_or(0, |last| last + 1);
                row[..filled].iter().map(Self::cell_to_string).collect()
            })
            .collect();

        Ok(TableData::new(rows))
    }

    fn select_sheet(sheet_names: &[String], requested: Option<&str>) -> LoadResult<String> {
        match requested {
            Some(name) if !name.is_empty() => sheet_names
                .iter()
                .find(|s| s.as_str() == name)
                .cloned()
                .ok_or_else(|| LoadError::SheetNotFound {
                    sheet: name.to_string(),
                }),
            _ => sheet_names.first().cloned().ok_or_else(|| {
                LoadError::MalformedResponse("workbook has no sheets".to_string())
            }),
        }
    }

    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::Error(e) => format!("#ERROR: {:?}", e),
            Data::DateTime(dt) => format!("{}", dt),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_xlsxwriter::Workbook;

    fn two_sheet_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();

        let first = workbook.add_worksheet();
        first.set_name("SheetOne").unwrap();
        first.write_string(0, 0, "Name").unwrap();
        first.write_string(0, 1, "Age").unwrap();
        first.write_string(1, 0, "Alice").unwrap();
        first.write_number(1, 1, 30).unwrap();

        let second = workbook.add_worksheet();
        second.set_name("SheetTwo").unwrap();
        second.write_string(0, 0, "Club").unwrap();
        second.write_number(1, 0, 2.5).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_first_sheet_by_default() {
        let data = XlsxHandler::read_sheet(two_sheet_workbook(), None).unwrap();
        assert_eq!(
            data,
            TableData::from(vec![vec!["Name", "Age"], vec!["Alice", "30"]])
        );
    }

    #[test]
    fn test_empty_sheet_name_means_first() {
        let data = XlsxHandler::read_sheet(two_sheet_workbook(), Some("")).unwrap();
        assert_eq!(data.rows[0], vec!["Name", "Age"]);
    }

    #[test]
    fn test_named_sheet() {
        let data = XlsxHandler::read_sheet(two_sheet_workbook(), Some("SheetTwo")).unwrap();
        assert_eq!(data, TableData::from(vec![vec!["Club"], vec!["2.5"]]));
    }

    #[test]
    fn test_rows_end_at_last_filled_cell() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Age").unwrap();
        sheet.write_string(0, 2, "Club").unwrap();
        sheet.write_string(1, 0, "Bob").unwrap();
        sheet.write_string(2, 0, "Ann").unwrap();
        sheet.write_string(2, 2, "Harbour FC").unwrap();
        sheet.write_string(4, 1, "late").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let data = XlsxHandler::read_sheet(bytes, None).unwrap();
        assert_eq!(
            data,
            TableData::new(vec![
                vec!["Name".to_string(), "Age".to_string(), "Club".to_string()],
                vec!["Bob".to_string()],
                vec!["Ann".to_string(), String::new(), "Harbour FC".to_string()],
                vec![],
                vec![String::new(), "late".to_string()],
            ])
        );
    }

    #[test]
    fn test_missing_sheet() {
        let err = XlsxHandler::read_sheet(two_sheet_workbook(), Some("NoSuchSheet")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SheetNotFound);
        assert!(err.to_string().contains("NoSuchSheet"));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = XlsxHandler::read_sheet(b"not a zip".to_vec(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(XlsxHandler::cell_to_string(&Data::Empty), "");
        assert_eq!(XlsxHandler::cell_to_string(&Data::Float(10.0)), "10");
        assert_eq!(XlsxHandler::cell_to_string(&Data::Float(3.25)), "3.25");
        assert_eq!(XlsxHandler::cell_to_string(&Data::Int(7)), "7");
        assert_eq!(XlsxHandler::cell_to_string(&Data::Bool(false)), "false");
    }
}
