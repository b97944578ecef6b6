//! Per-province burned-area totals.
//!
//! Rows are summed only when their region is one of the 13 canonical codes
//! and their area is a finite number. Everything else (subtotal lines,
//! footnotes, blank cells) is counted as skipped and never reported as an
//! error.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{Hectares, RegionCode};
use crate::ingest::Record;

/// Total burned area for one province or territory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProvinceTotal {
    pub code: RegionCode,
    pub total_ha: Hectares,
}

/// Summed burned area per jurisdiction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Total per code, only for codes present in the input
    pub totals: BTreeMap<RegionCode, Hectares>,
    /// Sum across all included codes
    pub grand_total: Hectares,
    /// Records that contributed to a total
    pub included: usize,
    /// Records dropped for an unknown region or unusable area
    pub skipped: usize,
}

impl Aggregate {
    /// Total for one code, if any record contributed to it
    pub fn total(&self, code: RegionCode) -> Option<Hectares> {
        self.totals.get(&code).copied()
    }

    /// Largest per-province total, zero when empty
    pub fn max_total(&self) -> Hectares {
        self.totals.values().copied().max().unwrap_or(Hectares::ZERO)
    }

    /// Totals as a list ordered by code
    pub fn province_totals(&self) -> Vec<ProvinceTotal> {
        self.totals
            .iter()
            .map(|(&code, &total_ha)| ProvinceTotal { code, total_ha })
            .collect()
    }

    /// True when no record was included
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    fn add(&mut self, record: &Record) {
        let Some(code) = record.region_code() else {
            debug!("Skipping row with unrecognized region {:?}", record.region);
            self.skipped += 1;
            return;
        };
        let area = match record.area_ha {
            Some(area) if area.is_finite() => Hectares::new(area),
            other => {
                debug!("Skipping {code} row with unusable area {other:?}");
                self.skipped += 1;
                return;
            }
        };
        *self.totals.entry(code).or_insert(Hectares::ZERO) += area;
        self.grand_total += area;
        self.included += 1;
    }
}

/// Sum burned area per province over every record.
pub fn aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut result = Aggregate::default();
    for record in records {
        result.add(record);
    }
    info!(
        "Aggregated {} rows into {} jurisdictions ({} skipped), total {}",
        result.included,
        result.totals.len(),
        result.skipped,
        result.grand_total
    );
    result
}

/// Sum burned area per province over records whose year falls in `years`.
///
/// Records without a usable year are outside every range and are counted as
/// skipped.
pub fn aggregate_years<'a, I>(records: I, years: RangeInclusive<i32>) -> Aggregate
where
    I: IntoIterator<Item = &'a Record>,
{
    let low = f64::from(*years.start());
    let high = f64::from(*years.end());
    let mut result = Aggregate::default();
    for record in records {
        match record.year {
            Some(year) if year >= low && year <= high => result.add(record),
            _ => result.skipped += 1,
        }
    }
    info!(
        "Aggregated {} rows for {}..={} into {} jurisdictions",
        result.included,
        years.start(),
        years.end(),
        result.totals.len()
    );
    result
}
