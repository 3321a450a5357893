//! Record transaction use case.
//! Validates the learner's input, classifies it, then stores it.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::{risk, Category, NewTransaction, Transaction};
use crate::error::AppError;
use crate::ports::TransactionRepository;
use crate::validation::{
    validate_amount, validate_optional, validate_payee, UPI_ID_MAX_LEN,
};

/// Input for the RecordTransaction use case.
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    pub user_id: Uuid,
    pub payee: String,
    pub amount: BigDecimal,
    pub category: Option<Category>,
    pub upi_id: Option<String>,
}

/// Use case for recording a learner's transaction.
pub struct RecordTransaction {
    transaction_repository: Arc<dyn TransactionRepository>,
}

impl RecordTransaction {
    pub fn new(transaction_repository: Arc<dyn TransactionRepository>) -> Self {
        Self {
            transaction_repository,
        }
    }

    pub async fn execute(&self, input: RecordTransactionInput) -> Result<Transaction, AppError> {
        let payee = validate_payee(&input.payee)?;
        validate_amount(&input.amount)?;
        let upi_id = validate_optional("upi_id", input.upi_id.as_deref(), UPI_ID_MAX_LEN)?;

        let verdict = risk::classify(&input.amount, &payee);
        let tx = Transaction::with_verdict(
            NewTransaction {
                user_id: input.user_id,
                payee,
                amount: input.amount,
                category: input.category.unwrap_or_default(),
                upi_id,
            },
            verdict,
        );

        let inserted = self.transaction_repository.insert(&tx).await?;

        if inserted.flagged {
            tracing::warn!(
                transaction_id = %inserted.id,
                user_id = %inserted.user_id,
                flagged = true,
                flag_reason = inserted.flag_reason.as_deref().unwrap_or_default(),
                "flagged transaction recorded"
            );
        } else {
            tracing::info!(
                transaction_id = %inserted.id,
                user_id = %inserted.user_id,
                flagged = false,
                "transaction recorded"
            );
        }

        Ok(inserted)
    }
}
