//! Validation of the amount the learner types before a payment app is opened.

use std::fmt;

use super::error::UpiError;

pub const EMPTY_AMOUNT: &str = "Enter amount";
pub const INVALID_AMOUNT: &str = "Enter a valid amount";

/// A confirmed positive amount, rendered with exactly two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedAmount {
    formatted: String,
}

impl ConfirmedAmount {
    pub fn as_str(&self) -> &str {
        &self.formatted
    }
}

impl fmt::Display for ConfirmedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Drops everything but ASCII digits and `.`, the way the amount field filters keystrokes.
pub fn sanitize_amount_input(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect()
}

/// Filters `raw` like the amount field does, then parses what is left.
pub fn parse_entered_amount(raw: &str) -> Result<ConfirmedAmount, UpiError> {
    parse_amount(&sanitize_amount_input(raw))
}

pub fn parse_amount(input: &str) -> Result<ConfirmedAmount, UpiError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, EMPTY_AMOUNT));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| invalid(input, INVALID_AMOUNT))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(input, INVALID_AMOUNT));
    }

    Ok(ConfirmedAmount {
        formatted: format!("{value:.2}"),
    })
}

fn invalid(input: &str, reason: &'static str) -> UpiError {
    UpiError::InvalidAmount {
        input: input.to_string(),
        reason,
    }
}
