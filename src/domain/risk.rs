//! Auto-flagging rule applied to every transaction when it is recorded.
//!
//! The rule is a total, side-effect-free function of `(amount, payee)`.
//! Callers run it explicitly right before a new record is committed; status
//! updates do not re-run it, so an amount edited after creation keeps the
//! verdict it was created with.

use bigdecimal::BigDecimal;
use serde::Serialize;

/// Amounts strictly above this are flagged.
pub const HIGH_AMOUNT_THRESHOLD: i64 = 3000;

/// Case-insensitive payee substrings that mark a payee as suspicious.
pub const SUSPICIOUS_PAYEE_KEYWORDS: [&str; 5] = ["unknown", "urgent", "prize", "lottery", "winner"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagReason {
    HighAmount,
    SuspiciousPayee,
}

impl FlagReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagReason::HighAmount => "High amount transaction",
            FlagReason::SuspiciousPayee => "Suspicious payee name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskVerdict {
    pub flagged: bool,
    pub reason: Option<FlagReason>,
}

impl RiskVerdict {
    const CLEAR: RiskVerdict = RiskVerdict {
        flagged: false,
        reason: None,
    };

    fn flagged(reason: FlagReason) -> Self {
        Self {
            flagged: true,
            reason: Some(reason),
        }
    }
}

/// Classifies one transaction. The amount rule takes precedence over the payee rule.
pub fn classify(amount: &BigDecimal, payee: &str) -> RiskVerdict {
    if *amount > BigDecimal::from(HIGH_AMOUNT_THRESHOLD) {
        return RiskVerdict::flagged(FlagReason::HighAmount);
    }

    if is_suspicious_payee(payee) {
        return RiskVerdict::flagged(FlagReason::SuspiciousPayee);
    }

    RiskVerdict::CLEAR
}

pub fn is_suspicious_payee(payee: &str) -> bool {
    let payee = payee.to_lowercase();
    SUSPICIOUS_PAYEE_KEYWORDS
        .iter()
        .any(|keyword| payee.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn ordinary_payment_is_not_flagged() {
        let verdict = classify(&amount("450"), "Medical Store");
        assert!(!verdict.flagged);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn threshold_itself_is_not_flagged() {
        assert!(!classify(&amount("3000"), "Electricity Board").flagged);
        assert!(!classify(&amount("3000.00"), "Electricity Board").flagged);
    }

    #[test]
    fn just_above_threshold_is_flagged() {
        let verdict = classify(&amount("3000.01"), "Electricity Board");
        assert!(verdict.flagged);
        assert_eq!(verdict.reason, Some(FlagReason::HighAmount));
    }

    #[test]
    fn amount_rule_wins_over_payee_rule() {
        let verdict = classify(&amount("5000"), "Unknown Vendor");
        assert!(verdict.flagged);
        assert_eq!(
            verdict.reason.map(|r| r.as_str()),
            Some("High amount transaction")
        );
    }

    #[test]
    fn suspicious_keywords_match_case_insensitively() {
        for payee in [
            "UNKNOWN caller",
            "Urgent Help Fund",
            "Claim your PRIZE",
            "State Lottery",
            "weekly winner club",
        ] {
            let verdict = classify(&amount("100"), payee);
            assert!(verdict.flagged, "{payee} should be flagged");
            assert_eq!(verdict.reason, Some(FlagReason::SuspiciousPayee));
        }
    }

    #[test]
    fn keyword_may_appear_inside_a_word() {
        assert!(is_suspicious_payee("Prizewinners Ltd"));
        assert!(!is_suspicious_payee("Priya Stores"));
    }

    #[test]
    fn zero_amount_with_clean_payee_is_clear() {
        assert_eq!(classify(&amount("0"), "Milk Booth"), RiskVerdict::CLEAR);
    }
}
