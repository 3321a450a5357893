//! Decoding of scanned or hand-built payment strings into a [`PaymentIntent`].
//!
//! Patterns are tried in order and the first match wins:
//!
//! 1. an exact `upi://pay?...` URI, terminated by `#` or whitespace;
//! 2. a `upi://pay?...` URI embedded in an intent wrapper, terminated by `;`, `"` or whitespace;
//! 3. a bare query carrying a `pa=` parameter, which gets a synthesized `upi://pay?` prefix.
//!
//! The matched text is kept byte-for-byte. Nothing here re-encodes or reorders parameters.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::UpiError;

pub const UPI_PAY_PREFIX: &str = "upi://pay?";

static EXACT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)upi://pay\?[^#\s]+").unwrap());

static EMBEDDED_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)upi://pay\?[^;"\s]+"#).unwrap());

static PAYEE_ADDRESS_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[?&])pa=").unwrap());

/// Which decode pattern produced the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    Exact,
    Embedded,
    BareQuery,
}

/// Canonical form of a payment code. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub raw_uri: String,
    pub query: String,
    /// `pn` display name; empty when absent or unreadable.
    pub payee_name: String,
    pub source: IntentSource,
}

impl PaymentIntent {
    fn from_uri(raw_uri: &str, source: IntentSource) -> Self {
        let query = raw_uri
            .split_once('?')
            .map(|(_, query)| query)
            .unwrap_or_default();
        Self::build(raw_uri.to_string(), query.to_string(), source)
    }

    fn from_bare_query(query: &str) -> Self {
        Self::build(
            format!("{UPI_PAY_PREFIX}{query}"),
            query.to_string(),
            IntentSource::BareQuery,
        )
    }

    fn build(raw_uri: String, query: String, source: IntentSource) -> Self {
        let payee_name = payee_name(&query);
        Self {
            raw_uri,
            query,
            payee_name,
            source,
        }
    }
}

/// Result of feeding one scanned string through the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Intent(PaymentIntent),
    NotRecognized { scanned: String },
}

impl DecodeOutcome {
    pub fn into_result(self) -> Result<PaymentIntent, UpiError> {
        match self {
            DecodeOutcome::Intent(intent) => Ok(intent),
            DecodeOutcome::NotRecognized { scanned } => {
                Err(UpiError::UnrecognizedPaymentCode { scanned })
            }
        }
    }
}

/// Decodes a raw string, returning `None` when no pattern matches.
pub fn decode(raw: &str) -> Option<PaymentIntent> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(m) = EXACT_URI.find(s) {
        return Some(PaymentIntent::from_uri(m.as_str(), IntentSource::Exact));
    }

    if let Some(m) = EMBEDDED_URI.find(s) {
        return Some(PaymentIntent::from_uri(m.as_str(), IntentSource::Embedded));
    }

    if PAYEE_ADDRESS_PARAM.is_match(s) {
        let query = s.split_once('?').map(|(_, query)| query).unwrap_or(s);
        return Some(PaymentIntent::from_bare_query(query));
    }

    None
}

/// Like [`decode`], but keeps the scanned text for the "not recognized" message.
pub fn scan(raw: &str) -> DecodeOutcome {
    match decode(raw) {
        Some(intent) => DecodeOutcome::Intent(intent),
        None => {
            tracing::info!(reason = "no matching pattern", "scanned code is not a UPI payment code");
            DecodeOutcome::NotRecognized {
                scanned: raw.trim().to_string(),
            }
        }
    }
}

/// Reads `pn` from a form-encoded query. Unreadable input yields an empty name.
pub fn payee_name(query: &str) -> String {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "pn")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exact_uri_verbatim() {
        let raw = "upi://pay?pa=x@bank&pn=Shop&am=10.00&cu=INR";
        let intent = decode(raw).expect("recognized");
        assert_eq!(intent.raw_uri, raw);
        assert_eq!(intent.query, "pa=x@bank&pn=Shop&am=10.00&cu=INR");
        assert_eq!(intent.payee_name, "Shop");
        assert_eq!(intent.source, IntentSource::Exact);
    }

    #[test]
    fn exact_uri_stops_at_fragment_and_whitespace() {
        let intent = decode("Pay here: upi://pay?pa=a@b&pn=A#frag more").expect("recognized");
        assert_eq!(intent.raw_uri, "upi://pay?pa=a@b&pn=A");

        let intent = decode("upi://pay?pa=a@b next-token").expect("recognized");
        assert_eq!(intent.query, "pa=a@b");
    }

    #[test]
    fn scheme_match_is_case_insensitive_and_preserved() {
        let intent = decode("UPI://PAY?pa=a@b&PN=X").expect("recognized");
        assert_eq!(intent.raw_uri, "UPI://PAY?pa=a@b&PN=X");
        // `pn` lookup is case-sensitive.
        assert_eq!(intent.payee_name, "");
    }

    #[test]
    fn keeps_percent_encoding_untouched() {
        let intent = decode("upi://pay?pa=a@b&pn=Ram%20Stores&tn=Bill+12").expect("recognized");
        assert_eq!(intent.query, "pa=a@b&pn=Ram%20Stores&tn=Bill+12");
        assert_eq!(intent.payee_name, "Ram Stores");
    }

    #[test]
    fn falls_back_to_embedded_pattern() {
        let wrapped = r#"intent://x"upi://pay?#pa=a@b;end"#;
        let intent = decode(wrapped).expect("recognized");
        assert_eq!(intent.source, IntentSource::Embedded);
        assert_eq!(intent.raw_uri, "upi://pay?#pa=a@b");
        assert_eq!(intent.query, "#pa=a@b");
    }

    #[test]
    fn synthesizes_uri_for_bare_query() {
        let intent = decode("pa=merchant@upi&pn=Tea%20Stall").expect("recognized");
        assert_eq!(intent.source, IntentSource::BareQuery);
        assert_eq!(intent.raw_uri, "upi://pay?pa=merchant@upi&pn=Tea%20Stall");
        assert_eq!(intent.query, "pa=merchant@upi&pn=Tea%20Stall");
        assert_eq!(intent.payee_name, "Tea Stall");
    }

    #[test]
    fn bare_query_after_other_url() {
        let intent = decode("https://pay.example/qr?tr=1&pa=m@upi").expect("recognized");
        assert_eq!(intent.query, "tr=1&pa=m@upi");
        assert_eq!(intent.raw_uri, "upi://pay?tr=1&pa=m@upi");
    }

    #[test]
    fn pa_must_be_a_parameter_name() {
        assert!(decode("papa=1&x=2").is_none());
        assert!(decode("random text with no upi params").is_none());
        assert!(decode("   ").is_none());
    }

    #[test]
    fn missing_payee_name_is_empty() {
        let intent = decode("upi://pay?pa=a@b").expect("recognized");
        assert_eq!(intent.payee_name, "");
    }

    #[test]
    fn malformed_query_does_not_fail_name_lookup() {
        assert_eq!(payee_name("%%%&pn=%zz&&="), "%zz");
        assert_eq!(payee_name(""), "");
    }

    #[test]
    fn scan_keeps_unrecognized_text() {
        let outcome = scan("  hello  ");
        assert_eq!(
            outcome,
            DecodeOutcome::NotRecognized {
                scanned: "hello".to_string()
            }
        );
        assert!(matches!(
            outcome.into_result(),
            Err(UpiError::UnrecognizedPaymentCode { .. })
        ));
    }
}
