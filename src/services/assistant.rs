//! Canned answers for common payment questions.
//!
//! Topics are checked in order; the first topic with a keyword contained in
//! the lower-cased question answers it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::validation::{sanitize_string, validate_max_len, validate_required, ValidationError, QUESTION_MAX_LEN};

struct Topic {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["upi", "unified", "payment", "interface"],
        answer: "UPI (Unified Payments Interface) is a simple way to send money using your phone. \
                 Just enter the amount and confirm with your PIN. It's safe and instant! \
                 You don't need to remember bank account numbers.",
    },
    Topic {
        keywords: &["qr", "code", "scan", "camera"],
        answer: "QR Code is like a special picture that contains payment information. \
                 Just point your phone camera at it, and it will show you who to pay and how much. \
                 It's faster than typing details.",
    },
    Topic {
        keywords: &["bill", "electricity", "water", "pay"],
        answer: "A bill is money you need to pay for services like electricity, water, or phone. \
                 You can pay bills online using UPI to avoid going to offices. \
                 Keep bills saved for records.",
    },
    Topic {
        keywords: &["fraud", "safe", "scam", "cheat", "security"],
        answer: "Safety tips: (1) Never share your PIN or OTP with anyone, \
                 (2) Always check the payee name before paying, \
                 (3) If someone calls asking for money urgently, verify with family first, \
                 (4) Banks never ask for passwords on phone.",
    },
    Topic {
        keywords: &["pin", "password", "otp"],
        answer: "PIN is your secret 4-6 digit password for payments. Never share it with anyone - \
                 not even bank staff. OTP is a one-time code sent to your phone for extra security. \
                 Use it only when YOU are making a payment.",
    },
    Topic {
        keywords: &["refund", "return", "money back"],
        answer: "If a payment fails or you paid wrong amount, refunds usually come back in 3-7 days. \
                 Check your bank statement. If money is not returned, contact your bank with the \
                 transaction ID.",
    },
];

pub const DEFAULT_ANSWER: &str = "I'm here to help! Ask me about UPI, QR codes, bills, \
                                  staying safe from fraud, or how payments work. \
                                  Keep your questions simple and I'll explain clearly.";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssistantReply {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

pub fn answer_for(question: &str) -> &'static str {
    let question = question.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| question.contains(k)))
        .map(|topic| topic.answer)
        .unwrap_or(DEFAULT_ANSWER)
}

pub fn ask(question: &str) -> Result<AssistantReply, ValidationError> {
    let question = sanitize_string(question);
    validate_required("question", &question)?;
    validate_max_len("question", &question, QUESTION_MAX_LEN)?;

    Ok(AssistantReply {
        answer: answer_for(&question).to_string(),
        question,
        timestamp: Utc::now(),
    })
}
