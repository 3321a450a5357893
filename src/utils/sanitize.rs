//! Masking of learner data before request bodies reach the logs.

use serde_json::{Map, Value};

/// Keys compared after lower-casing and dropping `_` and `-`, so `upi_id`,
/// `upiId` and `UPI-ID` are all the same key.
const SENSITIVE_KEYS: &[&str] = &[
    // payment addresses and scanned codes
    "upiid",
    "pa",
    "raw",
    // payee names
    "payee",
    "payeename",
    "pn",
    // credentials
    "password",
    "pin",
    "token",
    "authorization",
];

const VISIBLE_CHARS: usize = 4;

/// Returns a copy of `value` with every sensitive field masked, at any depth.
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| {
                    let val = if is_sensitive_key(key) {
                        mask_value(val)
                    } else {
                        sanitize_json(val)
                    };
                    (key.clone(), val)
                })
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized: String = key
        .chars()
        .filter(|ch| *ch != '_' && *ch != '-')
        .flat_map(char::to_lowercase)
        .collect();
    SENSITIVE_KEYS.contains(&normalized.as_str())
}

/// Long strings keep a short prefix and suffix for correlation; everything else is hidden.
fn mask_value(value: &Value) -> Value {
    let masked = match value {
        Value::String(s) if s.chars().count() > VISIBLE_CHARS * 2 => {
            let chars: Vec<char> = s.chars().collect();
            let head: String = chars[..VISIBLE_CHARS].iter().collect();
            let tail: String = chars[chars.len() - VISIBLE_CHARS..].iter().collect();
            format!("{head}****{tail}")
        }
        _ => "****".to_string(),
    };
    Value::String(masked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_upi_address_in_any_key_style() {
        let input = json!({
            "upiId": "ramesh.kumar@okbank",
            "upi_id": "ramesh.kumar@okbank",
            "amount": "100.00"
        });

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized["upiId"], "rame****bank");
        assert_eq!(sanitized["upi_id"], "rame****bank");
        assert_eq!(sanitized["amount"], "100.00");
    }

    #[test]
    fn masks_payee_names() {
        let input = json!({
            "payee": "Dr. Sharma Clinic",
            "payeeName": "Kirana",
            "category": "healthcare"
        });

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized["payee"], "Dr. ****inic");
        assert_eq!(sanitized["payeeName"], "****");
        assert_eq!(sanitized["category"], "healthcare");
    }

    #[test]
    fn masks_nested_values_and_non_strings() {
        let input = json!({
            "learner": { "pin": 1234, "name": "Kamala" },
            "items": [{ "raw": "upi://pay?pa=a@b" }]
        });

        let sanitized = sanitize_json(&input);
        assert_eq!(sanitized["learner"]["pin"], "****");
        assert_eq!(sanitized["learner"]["name"], "Kamala");
        assert_eq!(sanitized["items"][0]["raw"], "upi:****=a@b");
    }
}
