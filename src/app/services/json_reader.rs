//! JSON interchange reader
//!
//! Accepts an array of loosely-typed objects using the same field names as
//! the CSV interchange format and coerces every member to string form, so
//! that JSON input feeds the exact same validator as CSV rows.

use std::collections::HashMap;

use serde_json::Value;

use crate::app::models::RawTable;
use crate::{Error, Result};

/// Parse JSON text into a table of string-keyed records
///
/// The top-level value must be an array; anything else is a format error.
/// Scalars are stringified (`null` becomes the empty string), nested values
/// keep their JSON text. Array elements that are not objects become empty
/// records, which the validator rejects downstream.
pub fn parse(text: &str) -> Result<RawTable> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::format("JSON", e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(Error::format(
            "JSON",
            "top-level value must be an array of objects",
        ));
    };

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());

    for item in &items {
        let mut record = HashMap::new();
        if let Value::Object(map) = item {
            for (key, value) in map {
                record.insert(key.clone(), coerce_to_string(value));
            }
            if headers.is_empty() {
                headers = map.keys().cloned().collect();
            }
        }
        records.push(record);
    }

    Ok(RawTable { headers, records })
}

/// Coerce a JSON value to the string form the validator expects
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
