pub mod risk;
pub mod stats;
pub mod transaction;

pub use risk::{classify, FlagReason, RiskVerdict};
pub use stats::{month_start, CategoryStat, TransactionStats};
pub use transaction::{Category, NewTransaction, Status, Transaction};
