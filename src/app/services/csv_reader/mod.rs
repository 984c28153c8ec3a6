//! Interchange-CSV reader
//!
//! Parses the CSV interchange format into string-keyed records. The dialect
//! is deliberately forgiving:
//! - a line break inside an open quoted field does not terminate the line,
//!   and `\r\n` collapses to one terminator
//! - `""` inside a quoted field is an escaped literal `"`
//! - field text is trimmed of surrounding whitespace, quoted or not
//! - rows shorter than the header are padded with empty fields, extra
//!   values beyond the header are discarded
//! - blank logical lines (including a trailing one) are skipped
//!
//! ## Architecture
//!
//! - [`lines`] - logical line splitting with quote awareness
//! - [`fields`] - field splitting within one logical line
//! - [`parser`] - header/record assembly

pub mod fields;
pub mod lines;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use fields::split_fields;
pub use lines::split_logical_lines;
pub use parser::parse;
