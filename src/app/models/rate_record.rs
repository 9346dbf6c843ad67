//! # Rate Models
//!
//! One exchange-rate row and the ordered table of rows produced by a single
//! completed fetch.

use clap::ValueEnum;
use std::cmp::Ordering;

/// One currency-code/exchange-rate pair
///
/// Immutable once constructed; the parser is the only producer in the app.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    currency_code: String,
    rate: f64,
}

impl RateRecord {
    pub fn new(currency_code: impl Into<String>, rate: f64) -> Self {
        Self {
            currency_code: currency_code.into(),
            rate,
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Order in which rows are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    /// Keep the key order of the JSON response
    #[default]
    Response,
    /// Ascending currency code
    Code,
    /// Ascending rate
    Rate,
}

/// Ordered sequence of rate records for one completed fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateList {
    base: Option<String>,
    date: Option<String>,
    records: Vec<RateRecord>,
}

impl RateList {
    pub fn new(records: Vec<RateRecord>) -> Self {
        Self {
            base: None,
            date: None,
            records,
        }
    }

    /// Attach the response's base currency and publication date
    pub fn with_metadata(mut self, base: Option<String>, date: Option<String>) -> Self {
        self.base = base;
        self.date = date;
        self
    }

    /// Reorder the records in place
    pub fn sort_by(&mut self, order: SortOrder) {
        match order {
            SortOrder::Response => {}
            SortOrder::Code => self
                .records
                .sort_by(|a, b| a.currency_code.cmp(&b.currency_code)),
            // Rates are validated finite, so partial_cmp only fails on NaN
            SortOrder::Rate => self.records.sort_by(|a, b| {
                a.rate
                    .partial_cmp(&b.rate)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.currency_code.cmp(&b.currency_code))
            }),
        }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RateRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RateList {
    type Item = &'a RateRecord;
    type IntoIter = std::slice::Iter<'a, RateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
