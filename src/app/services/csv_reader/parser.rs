//! Header/record assembly for the CSV interchange format

use std::collections::HashMap;

use super::fields::split_fields;
use super::lines::split_logical_lines;
use crate::app::models::RawTable;

/// Parse CSV text into a table of string-keyed records
///
/// The first logical line is the header row; every following line becomes
/// one record keyed by header position. Records with fewer values than
/// headers fill the missing trailing fields with empty strings; values
/// beyond the header count are discarded. Empty input yields an empty
/// table.
pub fn parse(text: &str) -> RawTable {
    let lines = split_logical_lines(text);
    let Some((header_line, data_lines)) = lines.split_first() else {
        return RawTable::default();
    };

    let headers = split_fields(header_line);

    let mut records = Vec::with_capacity(data_lines.len());
    for line in data_lines {
        let values = split_fields(line);
        let mut record = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            let value = values.get(index).cloned().unwrap_or_default();
            record.insert(header.clone(), value);
        }
        records.push(record);
    }

    RawTable { headers, records }
}
