//! Column and region-name resolution for loosely formatted burned-area tables.
//!
//! Two jobs:
//! - work out which header columns hold the year, the jurisdiction and the
//!   burned area, whatever the dataset happens to call them
//! - turn free-text jurisdiction values (`"Québec"`, `"P.E.I."`,
//!   `"Territoires du Nord-Ouest"`, `"bc"`) into canonical two-letter codes
//!
//! All tables are static and built once on first use.

use std::sync::LazyLock;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core_types::RegionCode;

/// Year column aliases, in normalized form (lowercase, no whitespace or `_`)
const YEAR_ALIASES: &[&str] = &["year", "yr", "fireyear", "annee", "année", "reportyear", "repyear"];

/// Jurisdiction column aliases, in normalized form
const REGION_ALIASES: &[&str] = &[
    "province",
    "prov",
    "region",
    "territory",
    "name",
    "provinceterritory",
    "province/territory",
    "provterr",
    "jurisdiction",
    "juris",
    "agency",
    "srcagency",
    "provincename",
    "regionname",
];

/// Burned-area column aliases, in normalized form
const AREA_ALIASES: &[&str] = &[
    "areaha",
    "area",
    "hectares",
    "ha",
    "burnedarea",
    "burnedareaha",
    "areaburned",
    "areaburnedha",
    "areaburned(hectares)",
    "area(hectares)",
    "area(ha)",
    "sizeha",
    "firesizeha",
    "totalarea",
    "totalha",
    "superficie",
    "superficieha",
    "calcha",
    "polyha",
];

static YEAR_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| YEAR_ALIASES.iter().copied().collect());
static REGION_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| REGION_ALIASES.iter().copied().collect());
static AREA_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| AREA_ALIASES.iter().copied().collect());

/// Full names, French names and common abbreviations longer than two letters.
///
/// Keys are in lookup-key form: lowercase, diacritics removed, periods
/// removed, hyphens and runs of whitespace collapsed to a single space.
static NAME_TO_CODE: LazyLock<FxHashMap<&'static str, RegionCode>> = LazyLock::new(|| {
    use RegionCode::{
        Alberta, BritishColumbia, Manitoba, NewBrunswick, NewfoundlandAndLabrador,
        NorthwestTerritories, NovaScotia, Nunavut, Ontario, PrinceEdwardIsland, Quebec,
        Saskatchewan, Yukon,
    };
    [
        ("alberta", Alberta),
        ("alta", Alberta),
        ("british columbia", BritishColumbia),
        ("colombie britannique", BritishColumbia),
        ("manitoba", Manitoba),
        ("man", Manitoba),
        ("new brunswick", NewBrunswick),
        ("nouveau brunswick", NewBrunswick),
        ("newfoundland and labrador", NewfoundlandAndLabrador),
        ("newfoundland & labrador", NewfoundlandAndLabrador),
        ("newfoundland", NewfoundlandAndLabrador),
        ("labrador", NewfoundlandAndLabrador),
        ("terre neuve et labrador", NewfoundlandAndLabrador),
        ("nfld", NewfoundlandAndLabrador),
        ("nova scotia", NovaScotia),
        ("nouvelle ecosse", NovaScotia),
        ("northwest territories", NorthwestTerritories),
        ("north west territories", NorthwestTerritories),
        ("territoires du nord ouest", NorthwestTerritories),
        ("nwt", NorthwestTerritories),
        ("nunavut", Nunavut),
        ("ontario", Ontario),
        ("ont", Ontario),
        ("prince edward island", PrinceEdwardIsland),
        ("ile du prince edouard", PrinceEdwardIsland),
        ("pei", PrinceEdwardIsland),
        ("quebec", Quebec),
        ("que", Quebec),
        ("saskatchewan", Saskatchewan),
        ("sask", Saskatchewan),
        ("yukon", Yukon),
        ("yukon territory", Yukon),
        ("yukon territories", Yukon),
    ]
    .into_iter()
    .collect()
});

/// Header columns selected for each field, by original (trimmed) name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub year: Option<String>,
    pub region: Option<String>,
    pub area: Option<String>,
}

impl ColumnMap {
    /// True when no alias group matched at all
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.region.is_none() && self.area.is_none()
    }
}

/// Normalize a header name: lowercase, drop whitespace and underscores.
pub fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Pick the year, region and area columns out of a header row.
///
/// For each group the first header (in column order) whose normalized name is
/// one of the group's aliases wins. Groups with no match are `None`.
pub fn detect_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMap {
    let normalized: Vec<(String, &str)> = headers
        .iter()
        .map(|h| (normalize_header(h.as_ref()), h.as_ref().trim()))
        .collect();

    let first_match = |aliases: &FxHashSet<&'static str>| {
        normalized
            .iter()
            .find(|(norm, _)| aliases.contains(norm.as_str()))
            .map(|(_, original)| (*original).to_string())
    };

    ColumnMap {
        year: first_match(&*YEAR_SET),
        region: first_match(&*REGION_SET),
        area: first_match(&*AREA_SET),
    }
}

/// Decompose, strip combining marks, lowercase and trim.
///
/// `"  Québec "` becomes `"quebec"`.
pub fn clean_region_text(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapse a cleaned value into the key form used by the name table.
fn lookup_key(cleaned: &str) -> String {
    cleaned
        .replace('.', "")
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a free-text jurisdiction to a best-effort code.
///
/// Values longer than two characters are looked up in the full-name table;
/// anything that doesn't match comes back uppercased as-is. The result may
/// therefore be outside the 13-code set, which the aggregator filters.
/// Empty or whitespace-only input gives `None`.
///
/// ```
/// use burnmap_core::ingest::resolver::resolve_region;
///
/// assert_eq!(resolve_region("Québec").as_deref(), Some("QC"));
/// assert_eq!(resolve_region("PEI").as_deref(), Some("PE"));
/// assert_eq!(resolve_region("on").as_deref(), Some("ON"));
/// assert_eq!(resolve_region("Atlantis").as_deref(), Some("ATLANTIS"));
/// ```
pub fn resolve_region(raw: &str) -> Option<String> {
    let cleaned = clean_region_text(raw);
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.chars().count() > 2 {
        if let Some(code) = NAME_TO_CODE.get(lookup_key(&cleaned).as_str()) {
            return Some(code.code().to_string());
        }
    }
    Some(cleaned.to_uppercase())
}

/// Resolve free text straight to a member of the closed code set.
pub fn resolve_region_code(raw: &str) -> Option<RegionCode> {
    resolve_region(raw).and_then(|code| RegionCode::from_code(&code))
}
