//! UPI payment-intent codec: decode a scanned code, inject the learner's amount,
//! and plan the launch of the payment app.

pub mod amount;
pub mod driver;
pub mod error;
pub mod intent;
pub mod launch;
pub mod query;

pub use amount::{parse_amount, parse_entered_amount, sanitize_amount_input, ConfirmedAmount};
pub use driver::{run_launch, LaunchHost, LaunchOutcome, Visibility};
pub use error::UpiError;
pub use intent::{decode, scan, DecodeOutcome, IntentSource, PaymentIntent};
pub use launch::{
    LaunchAction, LaunchPlan, LaunchSequencer, LaunchState, LaunchTimings, Platform,
};
pub use query::{ensure_currency, set_amount};

/// A scanned code with the confirmed amount applied, ready to hand to the app.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPayment {
    pub intent: PaymentIntent,
    pub amount: ConfirmedAmount,
    /// Original query with only `am` written and `cu` ensured.
    pub query: String,
    pub plan: LaunchPlan,
}

/// Runs the whole scan → amount → plan pipeline. The amount is filtered to
/// digits and `.` before it is parsed.
pub fn prepare_payment(
    raw: &str,
    amount_input: &str,
    platform: Platform,
    timings: &LaunchTimings,
) -> Result<PreparedPayment, UpiError> {
    let intent = scan(raw).into_result()?;
    let amount = parse_entered_amount(amount_input)?;

    let query = ensure_currency(&set_amount(&intent.query, amount.as_str()));
    let plan = LaunchPlan::for_platform(platform, &query, timings);

    tracing::debug!(
        source = ?intent.source,
        platform = ?platform,
        amount = %amount,
        "prepared payment"
    );

    Ok(PreparedPayment {
        intent,
        amount,
        query,
        plan,
    })
}
