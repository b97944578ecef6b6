//! Delimited-text row parsing into typed burned-area records.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::numeric::coerce_field;
use super::resolver::{detect_columns, resolve_region, ColumnMap};
use crate::core_types::RegionCode;

/// Literal column names tried when alias detection finds nothing.
///
/// None of these normalize to an alias, so they only ever fill a group the
/// alias tables missed. Matched against the trimmed header exactly.
pub const REGION_FALLBACKS: &[&str] = &[
    "PROVINCE_TERRITORY_NAME",
    "Province/Territory Name",
    "Jurisdiction Name",
    "PROV_CODE",
    "Province or territory",
];
pub const AREA_FALLBACKS: &[&str] = &[
    "Area burned (ha)",
    "Hectares Burned",
    "FIRE_SIZE_HECTARES",
    "Burned area (hectares)",
    "Total hectares",
];
pub const YEAR_FALLBACKS: &[&str] = &[
    "FIRE_YEAR_REPORTED",
    "Reporting Year",
    "Season",
    "Fire season",
];

/// One burned-area row.
///
/// `None` marks a value that was missing or not a number. The region is a
/// best-effort code and may fall outside the 13-code set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub region: Option<String>,
    pub area_ha: Option<f64>,
    pub year: Option<f64>,
}

impl Record {
    /// Build a record from raw cell text, resolving and coercing each value.
    pub fn from_raw(region: Option<&str>, area_ha: Option<&str>, year: Option<&str>) -> Self {
        Self {
            region: region.and_then(resolve_region),
            area_ha: coerce_field(area_ha),
            year: coerce_field(year),
        }
    }

    /// The record's region if it belongs to the closed code set
    pub fn region_code(&self) -> Option<RegionCode> {
        self.region.as_deref().and_then(RegionCode::from_code)
    }
}

/// Result of parsing a whole table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Header names as read (trimmed)
    pub headers: Vec<String>,
    /// Columns chosen by alias detection
    pub columns: ColumnMap,
    /// One record per data line, in input order
    pub records: Vec<Record>,
    /// Data lines with an unterminated quoted cell; each still yields a record
    pub malformed_lines: usize,
}

/// Choose the field delimiter from the header line.
///
/// Tabs win outright; otherwise semicolons are used only when they outnumber
/// commas (European exports use `;` with decimal commas).
pub fn sniff_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        return b'\t';
    }
    let semis = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semis > commas {
        b';'
    } else {
        b','
    }
}

/// Split one line into trimmed cells.
///
/// Each line gets its own reader, so a quote left open on one line cannot
/// run on into the next.
fn split_line(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(_) => record.iter().map(str::to_string).collect(),
        Err(e) => {
            warn!("Unreadable line {line:?}: {e}");
            Vec::new()
        }
    }
}

fn has_open_quote(line: &str) -> bool {
    line.matches('"').count() % 2 == 1
}

fn pick<'a>(
    fields: &FxHashMap<&str, &'a str>,
    resolved: Option<&str>,
    fallbacks: &[&str],
) -> Option<&'a str> {
    resolved
        .and_then(|column| fields.get(column).copied())
        .or_else(|| fallbacks.iter().find_map(|name| fields.get(name).copied()))
}

/// Parse delimited text whose first non-blank line is a header.
///
/// Blank lines are dropped first. Every remaining data line yields exactly
/// one [`Record`]; unreadable values become `None` rather than errors.
pub fn parse_table(text: &str) -> ParsedTable {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        debug!("Empty burned-area table");
        return ParsedTable::default();
    };

    let delimiter = sniff_delimiter(header_line);
    let headers = split_line(header_line, delimiter);
    let columns = detect_columns(&headers);
    if columns.region.is_none() || columns.area.is_none() {
        debug!("Header aliases incomplete for {:?}, trying literal fallbacks", headers);
    }

    let mut records = Vec::new();
    let mut malformed_lines = 0;
    for (index, line) in lines.enumerate() {
        if has_open_quote(line) {
            debug!("Unterminated quote on data line {}: {line:?}", index + 1);
            malformed_lines += 1;
        }
        let cells = split_line(line, delimiter);
        let fields: FxHashMap<&str, &str> = headers
            .iter()
            .map(String::as_str)
            .zip(cells.iter().map(String::as_str))
            .collect();

        records.push(Record::from_raw(
            pick(&fields, columns.region.as_deref(), REGION_FALLBACKS),
            pick(&fields, columns.area.as_deref(), AREA_FALLBACKS),
            pick(&fields, columns.year.as_deref(), YEAR_FALLBACKS),
        ));
    }

    info!(
        "Parsed {} burned-area rows (region column: {:?}, area column: {:?}, {} malformed)",
        records.len(),
        columns.region,
        columns.area,
        malformed_lines
    );

    ParsedTable {
        headers,
        columns,
        records,
        malformed_lines,
    }
}

/// Convenience wrapper returning only the records.
pub fn parse_records(text: &str) -> Vec<Record> {
    parse_table(text).records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_alberta_row() {
        let records = parse_records("region,area_ha,year\nAlberta,\"1,234\",2020\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region.as_deref(), Some("AB"));
        assert_eq!(records[0].area_ha, Some(1234.0));
        assert_eq!(records[0].year, Some(2020.0));
    }

    #[test]
    fn test_blank_lines_skipped_and_order_preserved() {
        let text = "\n\nProvince,Hectares\n\nOntario,10\n   \nQuébec,20\nBC,30\n\n";
        let table = parse_table(text);
        let regions: Vec<_> = table
            .records
            .iter()
            .map(|r| r.region.clone().unwrap_or_default())
            .collect();
        assert_eq!(regions, vec!["ON", "QC", "BC"]);
        assert_eq!(table.columns.region.as_deref(), Some("Province"));
        assert_eq!(table.columns.area.as_deref(), Some("Hectares"));
        assert_eq!(table.columns.year, None);
    }

    #[test]
    fn test_short_rows_leave_fields_absent() {
        let records = parse_records("year,province,area_ha\n2019,Manitoba\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region.as_deref(), Some("MB"));
        assert_eq!(records[0].area_ha, None);
        assert_eq!(records[0].year, Some(2019.0));
    }

    #[test]
    fn test_unparseable_values_become_none() {
        let records = parse_records("prov,area\n,n/a\nYukon,\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, None);
        assert_eq!(records[0].area_ha, None);
        assert_eq!(records[1].region.as_deref(), Some("YT"));
        assert_eq!(records[1].area_ha, None);
    }

    #[test]
    fn test_semicolon_and_tab_delimiters() {
        let semi = parse_records("Jurisdiction;Area (hectares);Year\nNova Scotia;12 500;2023\n");
        assert_eq!(semi[0].region.as_deref(), Some("NS"));
        assert_eq!(semi[0].area_ha, Some(12500.0));

        let tab = parse_records("name\tha\nSaskatchewan\t7\n");
        assert_eq!(tab[0].region.as_deref(), Some("SK"));
        assert_eq!(tab[0].area_ha, Some(7.0));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let records = parse_records("\u{feff}Province,Area\nNunavut,3\n");
        assert_eq!(records[0].region.as_deref(), Some("NU"));
    }

    #[test]
    fn test_empty_input() {
        let table = parse_table("\n  \n");
        assert!(table.records.is_empty());
        assert!(table.headers.is_empty());
    }

    #[test]
    fn test_open_quote_stays_on_its_line() {
        let table = parse_table("province,area_ha\nAlberta,\"12\nOntario,5\nQuebec,7\n");
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.malformed_lines, 1);
        assert_eq!(table.records[0].region.as_deref(), Some("AB"));
        assert_eq!(table.records[1].region.as_deref(), Some("ON"));
        assert_eq!(table.records[1].area_ha, Some(5.0));
        assert_eq!(table.records[2].region.as_deref(), Some("QC"));
        assert_eq!(table.records[2].area_ha, Some(7.0));
    }

    #[test]
    fn test_literal_fallbacks_fill_missing_aliases() {
        let table = parse_table(
            "PROVINCE_TERRITORY_NAME,Area burned (ha),FIRE_YEAR_REPORTED\nAlberta,\"1,500\",2023\n",
        );
        assert!(table.columns.is_empty());
        assert_eq!(table.records[0].region.as_deref(), Some("AB"));
        assert_eq!(table.records[0].area_ha, Some(1500.0));
        assert_eq!(table.records[0].year, Some(2023.0));
    }

    #[test]
    fn test_fallbacks_never_overlap_aliases() {
        for names in [REGION_FALLBACKS, AREA_FALLBACKS, YEAR_FALLBACKS] {
            for name in names {
                assert!(detect_columns(&[*name]).is_empty(), "{name} is already an alias");
            }
        }
    }

    #[test]
    fn test_unknown_headers_yield_empty_records() {
        let table = parse_table("foo,bar\nAlberta,5\n");
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].region, None);
        assert_eq!(table.records[0].area_ha, None);
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb"), b'\t');
        assert_eq!(sniff_delimiter("single"), b',');
    }
}
