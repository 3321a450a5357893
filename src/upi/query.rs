//! Targeted edits of a UPI query string.
//!
//! Payment apps are strict about how the query they receive is encoded, so the
//! query is never parsed and re-serialized. Only the value being written is
//! percent-encoded; every other byte stays where it was.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

pub const AMOUNT_KEY: &str = "am";
pub const CURRENCY_KEY: &str = "cu";
pub const CURRENCY_INR: &str = "INR";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static AMOUNT_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|&)am=([^&]*)").unwrap());

static CURRENCY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|&)cu=([^&]*)").unwrap());

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Writes `am=<amount>` into the query.
///
/// An existing `am` key (any case) keeps its position and spelling; only its
/// value changes. Otherwise the key is appended.
pub fn set_amount(query: &str, amount: &str) -> String {
    set_param(query, &AMOUNT_PARAM, AMOUNT_KEY, amount)
}

/// Appends `cu=INR` unless a currency is already present. An existing currency is never replaced.
pub fn ensure_currency(query: &str) -> String {
    if CURRENCY_PARAM.is_match(query) {
        return query.to_string();
    }
    append_param(query, CURRENCY_KEY, CURRENCY_INR)
}

fn set_param(query: &str, pattern: &Regex, key: &str, value: &str) -> String {
    let encoded = encode_uri_component(value);

    if let Some(existing) = pattern.captures(query).and_then(|caps| caps.get(2)) {
        let mut out = String::with_capacity(query.len() + encoded.len());
        out.push_str(&query[..existing.start()]);
        out.push_str(&encoded);
        out.push_str(&query[existing.end()..]);
        return out;
    }

    append_param(query, key, &encoded)
}

fn append_param(query: &str, key: &str, encoded_value: &str) -> String {
    if query.is_empty() {
        format!("{key}={encoded_value}")
    } else {
        format!("{query}&{key}={encoded_value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_amount_when_missing() {
        assert_eq!(
            set_amount("pa=x@bank&pn=Shop", "25.00"),
            "pa=x@bank&pn=Shop&am=25.00"
        );
    }

    #[test]
    fn replaces_amount_without_duplication() {
        let once = set_amount("pa=x@bank&pn=Shop", "25.00");
        let twice = set_amount(&once, "30.00");
        assert_eq!(twice, "pa=x@bank&pn=Shop&am=30.00");
    }

    #[test]
    fn replaces_amount_in_place() {
        assert_eq!(
            set_amount("am=1&pa=x@bank&pn=A%20B", "99.50"),
            "am=99.50&pa=x@bank&pn=A%20B"
        );
        assert_eq!(
            set_amount("pa=x@bank&am=&tn=rent", "10.00"),
            "pa=x@bank&am=10.00&tn=rent"
        );
    }

    #[test]
    fn keeps_existing_key_case() {
        assert_eq!(
            set_amount("pa=x@bank&AM=5&cu=INR", "7.00"),
            "pa=x@bank&AM=7.00&cu=INR"
        );
    }

    #[test]
    fn only_matches_whole_key() {
        // `tam` and `name` must not be mistaken for `am`.
        assert_eq!(
            set_amount("tam=3&pa=x@bank", "1.00"),
            "tam=3&pa=x@bank&am=1.00"
        );
    }

    #[test]
    fn empty_query_gets_bare_param() {
        assert_eq!(set_amount("", "5.00"), "am=5.00");
        assert_eq!(ensure_currency(""), "cu=INR");
    }

    #[test]
    fn encodes_only_inserted_value() {
        assert_eq!(
            set_amount("pn=A%20B&x=a+b", "1 000"),
            "pn=A%20B&x=a+b&am=1%20000"
        );
    }

    #[test]
    fn adds_currency_when_missing() {
        assert_eq!(ensure_currency("pa=x@bank&am=10"), "pa=x@bank&am=10&cu=INR");
    }

    #[test]
    fn never_overwrites_currency() {
        assert_eq!(ensure_currency("pa=x@bank&cu=USD"), "pa=x@bank&cu=USD");
        assert_eq!(ensure_currency("CU=inr&pa=x@bank"), "CU=inr&pa=x@bank");
    }

    #[test]
    fn encode_uri_component_matches_browser_behaviour() {
        assert_eq!(encode_uri_component("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(
            encode_uri_component("https://play.google.com/store/apps/details?id=x"),
            "https%3A%2F%2Fplay.google.com%2Fstore%2Fapps%2Fdetails%3Fid%3Dx"
        );
    }
}
