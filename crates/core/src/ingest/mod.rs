//! Burned-area table ingestion.
//!
//! Raw delimited text flows through [`rows::parse_table`], which leans on
//! [`resolver`] to find the interesting columns and canonicalize region names
//! and on [`numeric`] to turn formatted cells into numbers.

pub mod numeric;
pub mod resolver;
pub mod rows;

pub use numeric::{coerce_field, coerce_number};
pub use resolver::{
    clean_region_text, detect_columns, normalize_header, resolve_region, resolve_region_code,
    ColumnMap,
};
pub use rows::{parse_records, parse_table, sniff_delimiter, ParsedTable, Record};
