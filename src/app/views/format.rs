//! Text formatting shared by the terminal renderer and the plain printer.

use crate::app::models::{RateList, RateRecord};

/// Width of the currency-code column
const CODE_WIDTH: usize = 6;

/// Width of the right-aligned rate column
const RATE_WIDTH: usize = 16;

/// One list row: code left-aligned, rate right-aligned to 4 decimal places
pub fn format_row(record: &RateRecord) -> String {
    format!(
        "{:<code$}{:>rate$.4}",
        record.currency_code(),
        record.rate(),
        code = CODE_WIDTH,
        rate = RATE_WIDTH
    )
}

/// Title line, e.g. `Exchange rates (base GBP, 2024-01-02)`
///
/// The response's own base wins over the requested one.
pub fn header_text(rates: Option<&RateList>, requested_base: &str) -> String {
    let base = rates.and_then(RateList::base).unwrap_or(requested_base);
    match rates.and_then(RateList::date) {
        Some(date) => format!("Exchange rates (base {base}, {date})"),
        None => format!("Exchange rates (base {base})"),
    }
}

/// Cut `text` to at most `width` characters
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Left padding that centres `text` in `width` columns
pub fn centre_offset(text: &str, width: usize) -> usize {
    width.saturating_sub(text.chars().count()) / 2
}
