//! Syntax checks run before a query is sent anywhere.

use crate::query::builder::DATE_VALUE;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static DATE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:before|after):(\S+)").unwrap());

/// Why a query was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unmatched closing parenthesis")]
    UnmatchedClosingParen,

    #[error("Unmatched opening parenthesis")]
    UnmatchedOpeningParen,

    #[error("Unmatched quotation mark")]
    UnmatchedQuote,

    #[error("Invalid date format: {0}. Use YYYY-MM-DD")]
    InvalidDateFormat(String),
}

/// Optional checks beyond the default syntax rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Reject well-formed dates that are not real calendar days (`2025-13-40`).
    pub calendar_dates: bool,
}

/// `{valid, error}` view of a validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Result<(), ValidationError>> for ValidationReport {
    fn from(result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Check parentheses, quotes and date formats. The first failure wins.
pub fn validate_query(query: &str) -> Result<(), ValidationError> {
    validate_query_with(query, &ValidationOptions::default())
}

pub fn validate_query_with(query: &str, options: &ValidationOptions) -> Result<(), ValidationError> {
    if query.is_empty() {
        return Ok(());
    }

    check_parens(query)?;
    check_quotes(query)?;
    check_dates(query, options)?;

    Ok(())
}

fn check_parens(query: &str) -> Result<(), ValidationError> {
    let mut depth: i64 = 0;
    for ch in query.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(ValidationError::UnmatchedClosingParen);
        }
    }
    if depth > 0 {
        return Err(ValidationError::UnmatchedOpeningParen);
    }
    Ok(())
}

fn check_quotes(query: &str) -> Result<(), ValidationError> {
    if query.matches('"').count() % 2 != 0 {
        return Err(ValidationError::UnmatchedQuote);
    }
    Ok(())
}

fn check_dates(query: &str, options: &ValidationOptions) -> Result<(), ValidationError> {
    for cap in DATE_OPERATOR.captures_iter(query) {
        let Some(date) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let well_formed = DATE_VALUE.is_match(date)
            && (!options.calendar_dates || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
        if !well_formed {
            return Err(ValidationError::InvalidDateFormat(date.to_string()));
        }
    }
    Ok(())
}
