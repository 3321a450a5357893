pub mod record_transaction;
pub mod update_transaction_status;

pub use record_transaction::{RecordTransaction, RecordTransactionInput};
pub use update_transaction_status::UpdateTransactionStatus;
