use bigdecimal::BigDecimal;
use std::fmt;

pub const PAYEE_MAX_LEN: usize = 200;
pub const UPI_ID_MAX_LEN: usize = 255;
pub const TRANSACTION_ID_MAX_LEN: usize = 255;
pub const QUESTION_MAX_LEN: usize = 1000;

/// Decimal places kept by the `amount NUMERIC(14, 2)` column.
pub const AMOUNT_SCALE: i64 = 2;
/// Smallest amount that no longer fits in `NUMERIC(14, 2)`.
pub const AMOUNT_LIMIT: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

/// Sanitizes and validates a payee name, returning the cleaned value.
pub fn validate_payee(payee: &str) -> Result<String, ValidationError> {
    let payee = sanitize_string(payee);
    validate_required("payee", &payee)?;
    validate_max_len("payee", &payee, PAYEE_MAX_LEN)?;
    Ok(payee)
}

/// Sanitizes an optional free-text field; blank values become `None`.
pub fn validate_optional(
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value.map(sanitize_string).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    validate_max_len(field, &value, max_len)?;
    Ok(Some(value))
}

/// Accepts only amounts the store keeps exactly, so the risk verdict computed
/// on the request value still holds for the stored value.
pub fn validate_amount(amount: &BigDecimal) -> ValidationResult {
    if amount < &BigDecimal::from(0) {
        return Err(ValidationError::new("amount", "must not be negative"));
    }

    if amount >= &BigDecimal::from(AMOUNT_LIMIT) {
        return Err(ValidationError::new(
            "amount",
            format!("must be less than {}", AMOUNT_LIMIT),
        ));
    }

    if amount.with_scale(AMOUNT_SCALE) != *amount {
        return Err(ValidationError::new(
            "amount",
            format!("must have at most {} decimal places", AMOUNT_SCALE),
        ));
    }

    Ok(())
}
