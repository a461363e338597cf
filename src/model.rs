// Core structs: PriceRecord, PriceTable, DistributionStats, CountryAssessment
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One row of a fuel price table: a country and its price per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub country: String,
    pub price: f64,
}

/// A raw row rejected during table construction, returned to the caller so
/// nothing is dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub country: String,
    pub price: f64,
}

/// An ordered country→price table for a single fuel type.
///
/// Construction via [`PriceTable::from_records`] sanitizes the raw rows:
/// non-finite or non-positive prices are rejected, duplicate country names
/// resolve last-price-wins at the first occurrence's position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    pub records: Vec<PriceRecord>,
}

impl PriceTable {
    /// Builds a sanitized table from raw parsed rows.
    ///
    /// Returns the table together with every rejected row. The table may be
    /// empty; emptiness surfaces as [`AnalyzeError::EmptyTable`] once
    /// analysis is attempted.
    pub fn from_records(raw: Vec<PriceRecord>) -> (Self, Vec<RejectedRecord>) {
        let mut records: Vec<PriceRecord> = Vec::with_capacity(raw.len());
        let mut rejected = Vec::new();

        for rec in raw {
            if !rec.price.is_finite() || rec.price <= 0.0 || rec.country.is_empty() {
                rejected.push(RejectedRecord {
                    country: rec.country,
                    price: rec.price,
                });
                continue;
            }
            match records.iter_mut().find(|r| r.country == rec.country) {
                Some(existing) => existing.price = rec.price,
                None => records.push(rec),
            }
        }

        (Self { records }, rejected)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-sensitive exact-match lookup.
    pub fn get(&self, country: &str) -> Option<&PriceRecord> {
        self.records.iter().find(|r| r.country == country)
    }

    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }
}

/// Parsed page content before sanitization: raw rows plus the page's
/// "as of" date label, passed through to the report unmodified.
#[derive(Debug, Clone)]
pub struct PriceSheet {
    pub rows: Vec<PriceRecord>,
    pub as_of: String,
}

/// Snapshot of one fuel's sanitized table, ready for analysis.
#[derive(Debug, Clone)]
pub struct FuelSnapshot {
    pub fuel: String,
    pub table: PriceTable,
    pub as_of: String,
    pub fetched_at: DateTime<Utc>,
}

/// Distribution statistics over one price table. Computed once per table,
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor N, not N-1).
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// Which side of the one-standard-deviation band a price falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdDevBand {
    Above1Sd,
    Within1Sd,
    Below1Sd,
}

/// Quartile bucket; edge values land in the bucket above the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuartileBucket {
    Q1,
    Q2,
    Q3,
    Q4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
}

/// Signed position relative to the global mean.
///
/// `percent_diff` divides by the focus country's own price rather than the
/// mean, matching observed upstream behavior. The metric is asymmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeToMean {
    pub direction: Direction,
    pub percent_diff: f64,
}

/// Full positional classification of one focus country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryAssessment {
    pub country: String,
    pub price: f64,
    /// Percentage of table entries priced at or below this one, 1 decimal.
    pub percentile_rank: f64,
    pub std_dev_band: StdDevBand,
    pub quartile_bucket: QuartileBucket,
    pub is_outlier: bool,
    pub relative_to_mean: RelativeToMean,
}

/// Focus countries grouped by std-dev band, supply order preserved.
/// Countries absent from the table land in `missing` instead of aborting
/// the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandGroups {
    pub above_1sd: Vec<String>,
    pub within_1sd: Vec<String>,
    pub below_1sd: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("non-success response")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("bad selector: {0}")]
    Selector(String),
    #[error("missing page section: {0}")]
    MissingSection(&'static str),
    #[error("unparseable price token: {0:?}")]
    BadPrice(String),
    #[error("country/price count mismatch: {names} names vs {prices} prices")]
    ShapeMismatch { names: usize, prices: usize },
}

/// Validation errors local to the analyzer. Never retried.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyzeError {
    #[error("no price records available")]
    EmptyTable,
    #[error("country not found: {0}")]
    CountryNotFound(String),
    #[error("invalid price {price} for {country}")]
    InvalidPrice { country: String, price: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, price: f64) -> PriceRecord {
        PriceRecord {
            country: country.into(),
            price,
        }
    }

    #[test]
    fn from_records_rejects_bad_prices() {
        let raw = vec![
            rec("Norway", 2.1),
            rec("Nowhere", f64::NAN),
            rec("Atlantis", -1.0),
            rec("Limbo", 0.0),
            rec("France", 1.9),
        ];
        let (table, rejected) = PriceTable::from_records(raw);
        assert_eq!(table.len(), 2);
        assert_eq!(
            rejected.iter().map(|r| r.country.as_str()).collect::<Vec<_>>(),
            vec!["Nowhere", "Atlantis", "Limbo"]
        );
    }

    #[test]
    fn duplicate_country_last_price_wins_first_position_kept() {
        let raw = vec![rec("A", 1.0), rec("B", 2.0), rec("A", 3.0)];
        let (table, rejected) = PriceTable::from_records(raw);
        assert!(rejected.is_empty());
        assert_eq!(table.records, vec![rec("A", 3.0), rec("B", 2.0)]);
    }

    #[test]
    fn dedup_is_deterministic() {
        let raw = vec![rec("A", 1.0), rec("A", 2.0), rec("A", 3.0)];
        let (first, _) = PriceTable::from_records(raw.clone());
        let (second, _) = PriceTable::from_records(raw);
        assert_eq!(first, second);
        assert_eq!(first.records, vec![rec("A", 3.0)]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let (table, _) = PriceTable::from_records(vec![rec("Chile", 1.3)]);
        assert!(table.get("Chile").is_some());
        assert!(table.get("chile").is_none());
    }
}
