//! Price-per-unit ranking.
//!
//! `rank = price / weight`, with a missing price read as 0 and a missing weight
//! read as 1. A record without a price therefore ranks 0 and sorts ahead of
//! everything priced. Present values that are not numbers are errors, never
//! silently defaulted.

use ordered_float::OrderedFloat;

use crate::error::RankError;
use crate::fields::CanonicalField;
use crate::record::Record;

const MISSING_PRICE: f64 = 0.0;
const MISSING_WEIGHT: f64 = 1.0;

/// Price per unit of weight for one record.
pub fn rank(record: &Record) -> Result<f64, RankError> {
    let price = match record.price() {
        Some(raw) => parse_quantity(CanonicalField::Price, raw, record)?,
        None => MISSING_PRICE,
    };
    let weight = match record.weight() {
        Some(raw) => parse_quantity(CanonicalField::Weight, raw, record)?,
        None => MISSING_WEIGHT,
    };

    if weight == 0.0 {
        return Err(RankError::ZeroWeight {
            value: record.weight().unwrap_or_default().to_string(),
            source_file: record.source_file().to_string(),
        });
    }

    Ok(price / weight)
}

fn parse_quantity(field: CanonicalField, raw: &str, record: &Record) -> Result<f64, RankError> {
    raw.trim().parse::<f64>().map_err(|_| RankError::InvalidNumber {
        field,
        value: raw.to_string(),
        source_file: record.source_file().to_string(),
    })
}

// =============================================================================
// Ranked views
// =============================================================================

/// A record paired with its full-precision rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub record: &'a Record,
    pub rank: f64,
}

/// Sort key with an explicit tie-breaker so equal ranks keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    value: OrderedFloat<f64>,
    position: usize,
}

/// Rank every record and sort ascending by rank.
///
/// All ranks are computed before sorting; the first record that fails to rank
/// aborts the whole view. Ties keep the order in which records were supplied.
pub fn sort_ascending<'a, I>(records: I) -> Result<Vec<Ranked<'a>>, RankError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut keyed: Vec<(RankKey, Ranked<'a>)> = Vec::new();
    for (position, record) in records.into_iter().enumerate() {
        let value = rank(record)?;
        keyed.push((
            RankKey { value: OrderedFloat(value), position },
            Ranked { record, rank: value },
        ));
    }

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(keyed.into_iter().map(|(_, ranked)| ranked).collect())
}

/// Format a rank for display with a fixed number of decimals.
pub fn format_rank(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}
