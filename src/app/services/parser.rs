//! # Rate Parser
//!
//! Turns a response body of the shape
//! `{"base": "GBP", "date": "2024-01-02", "rates": {"USD": 1.27, ...}}`
//! into a [`RateList`].

use crate::app::models::{RateList, RateRecord, SortOrder};
use crate::config::is_currency_code;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Reasons a response body cannot be turned into a rate table
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no 'rates' field")]
    MissingRates,

    #[error("'rates' field is not an object")]
    MalformedRates,

    #[error("'{0}' is not a currency code")]
    InvalidCurrencyCode(String),

    #[error("rate for {code} is invalid: {value}")]
    InvalidRate { code: String, value: String },
}

/// Top-level fields of a rate response; anything else is ignored.
/// `base` and `date` are informational, so a value of the wrong type is
/// dropped rather than failing the parse.
#[derive(Debug, Deserialize)]
struct RateEnvelope {
    #[serde(default)]
    base: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    rates: Option<Value>,
}

/// Parse a response body keeping the JSON key order
pub fn parse(raw_body: &str) -> Result<RateList, ParseError> {
    parse_with(raw_body, SortOrder::Response)
}

/// Parse a response body and order the rows by `order`
pub fn parse_with(raw_body: &str, order: SortOrder) -> Result<RateList, ParseError> {
    let document: Value = serde_json::from_str(raw_body)?;
    if !document.is_object() {
        return Err(ParseError::NotAnObject);
    }
    let envelope: RateEnvelope = serde_json::from_value(document)?;

    let rates = match &envelope.rates {
        None => return Err(ParseError::MissingRates),
        Some(Value::Object(rates)) => rates,
        Some(_) => return Err(ParseError::MalformedRates),
    };

    let mut records = Vec::with_capacity(rates.len());
    for (code, value) in rates {
        if !is_currency_code(code) {
            return Err(ParseError::InvalidCurrencyCode(code.clone()));
        }
        let rate = value
            .as_f64()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| ParseError::InvalidRate {
                code: code.clone(),
                value: value.to_string(),
            })?;
        records.push(RateRecord::new(code.as_str(), rate));
    }

    let text_field = |field: Option<Value>| match field {
        Some(Value::String(text)) => Some(text),
        _ => None,
    };
    let mut list = RateList::new(records)
        .with_metadata(text_field(envelope.base), text_field(envelope.date));
    list.sort_by(order);

    tracing::debug!("Parsed {} rate records", list.len());
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_should_produce_one_record_per_entry() {
        let body = r#"{"base":"GBP","date":"2018-01-05","rates":{"AUD":1.7286,"BGN":2.2138,"CAD":1.6933,"USD":1.3568}}"#;
        let list = parse(body).unwrap();

        assert_eq!(list.len(), 4);
        assert!(list.iter().all(|record| record.rate() > 0.0));
        assert_eq!(list.base(), Some("GBP"));
        assert_eq!(list.date(), Some("2018-01-05"));
    }

    #[test]
    fn parse_should_keep_response_key_order() {
        let list = parse(r#"{"rates":{"USD":1.3,"EUR":1.1}}"#).unwrap();
        let rows: Vec<(&str, f64)> = list
            .iter()
            .map(|record| (record.currency_code(), record.rate()))
            .collect();

        assert_eq!(rows, vec![("USD", 1.3), ("EUR", 1.1)]);
    }

    #[test]
    fn parse_with_should_apply_sort_order() {
        let list = parse_with(r#"{"rates":{"USD":1.3,"EUR":1.1}}"#, SortOrder::Code).unwrap();
        assert_eq!(list.records()[0].currency_code(), "EUR");
    }

    #[test]
    fn empty_rates_should_be_valid_and_empty() {
        let list = parse(r#"{"rates": {}}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn missing_rates_should_fail() {
        let result = parse(r#"{"base":"GBP"}"#);
        assert!(matches!(result, Err(ParseError::MissingRates)));
        assert!(matches!(
            parse(r#"{"rates":null}"#),
            Err(ParseError::MissingRates)
        ));
    }

    #[test]
    fn non_object_rates_should_fail() {
        assert!(matches!(
            parse(r#"{"rates":[1.3, 1.1]}"#),
            Err(ParseError::MalformedRates)
        ));
        assert!(matches!(
            parse(r#"{"rates":"USD=1.3"}"#),
            Err(ParseError::MalformedRates)
        ));
    }

    #[test]
    fn non_string_metadata_should_be_dropped() {
        let list = parse(r#"{"base":"GBP","date":20180105,"rates":{"USD":1.3}}"#).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.base(), Some("GBP"));
        assert_eq!(list.date(), None);

        let list = parse(r#"{"base":{"code":"GBP"},"rates":{"USD":1.3,"EUR":1.1}}"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.base(), None);
    }

    #[test]
    fn invalid_json_should_fail() {
        assert!(matches!(
            parse("<html>502 Bad Gateway</html>"),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(parse(""), Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn top_level_array_should_fail() {
        assert!(matches!(parse("[1, 2]"), Err(ParseError::NotAnObject)));
    }

    #[test]
    fn non_positive_or_non_numeric_rates_should_fail() {
        for body in [
            r#"{"rates":{"USD":0}}"#,
            r#"{"rates":{"USD":-1.2}}"#,
            r#"{"rates":{"USD":"1.3"}}"#,
            r#"{"rates":{"USD":null}}"#,
        ] {
            assert!(
                matches!(parse(body), Err(ParseError::InvalidRate { .. })),
                "expected invalid rate for {body}"
            );
        }
    }

    #[test]
    fn malformed_currency_code_should_fail() {
        let result = parse(r#"{"rates":{"usd":1.3}}"#);
        match result {
            Err(ParseError::InvalidCurrencyCode(code)) => assert_eq!(code, "usd"),
            other => panic!("Expected InvalidCurrencyCode, got {other:?}"),
        }
    }

    #[test]
    fn integer_rates_should_be_accepted() {
        let list = parse(r#"{"rates":{"JPY":150}}"#).unwrap();
        assert_eq!(list.records()[0].rate(), 150.0);
    }
}
