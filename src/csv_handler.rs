// src/csv_handler.rs
use csv::ReaderBuilder;

use crate::data_types::TableData;
use crate::error::LoadResult;

pub struct CSVHandler {}

impl CSVHandler {
    /// Split trimmed text into lines and each line on `,`.
    ///
    /// Quoting is off: a quote is an ordinary character and a comma always
    /// separates cells. Rows keep whatever width they have and a blank line
    /// is a row with one empty cell.
    pub fn parse_csv(text: &str) -> LoadResult<TableData> {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .delimiter(b',')
            .quoting(false)
            .flexible(true);

        let mut data = TableData::empty();
        for line in text.trim().lines() {
            // the reader skips empty records, so blank lines are kept here
            if line.is_empty() {
                data.rows.push(vec![String::new()]);
                continue;
            }

            let mut reader = builder.from_reader(line.as_bytes());
            for result in reader.records() {
                let record = result?;
                data.rows.push(record.iter().map(String::from).collect());
            }
        }

        Ok(data)
    }

    /// One single-cell row per line of trimmed text.
    pub fn parse_lines(text: &str) -> TableData {
        let rows = text
            .trim()
            .lines()
            .map(|line| vec![line.to_string()])
            .collect();
        TableData::new(rows)
    }
}
