//! Update transaction status use case.
//!
//! Only `status` and the external payment reference change. The risk verdict
//! assigned at creation is kept as-is; reclassifying on update is an open
//! product question and deliberately not done here.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Status, Transaction};
use crate::error::AppError;
use crate::ports::TransactionRepository;
use crate::validation::{validate_optional, TRANSACTION_ID_MAX_LEN};

pub struct UpdateTransactionStatus {
    transaction_repository: Arc<dyn TransactionRepository>,
}

impl UpdateTransactionStatus {
    pub fn new(transaction_repository: Arc<dyn TransactionRepository>) -> Self {
        Self {
            transaction_repository,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: Status,
        transaction_id: Option<String>,
    ) -> Result<Transaction, AppError> {
        let transaction_id = validate_optional(
            "transaction_id",
            transaction_id.as_deref(),
            TRANSACTION_ID_MAX_LEN,
        )?;

        let updated = self
            .transaction_repository
            .update_status(user_id, id, status, transaction_id)
            .await?;

        tracing::info!(transaction_id = %id, status = %status, "transaction status updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTransactionRepository;
    use crate::domain::{Category, NewTransaction};
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn updates_status_without_reclassifying() {
        let repo = Arc::new(InMemoryTransactionRepository::new());
        let learner = Uuid::new_v4();
        let mut tx = Transaction::new(NewTransaction {
            user_id: learner,
            payee: "Grocer".to_string(),
            amount: BigDecimal::from(100),
            category: Category::Groceries,
            upi_id: None,
        });
        // Simulate an amount edited after creation; the verdict must not change.
        tx.amount = BigDecimal::from(9000);
        repo.insert(&tx).await.unwrap();

        let use_case = UpdateTransactionStatus::new(repo);
        let updated = use_case
            .execute(learner, tx.id, Status::Completed, Some(" T-42 ".into()))
            .await
            .unwrap();

        assert_eq!(updated.status, Status::Completed);
        assert_eq!(updated.transaction_id.as_deref(), Some("T-42"));
        assert!(!updated.flagged);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let use_case = UpdateTransactionStatus::new(Arc::new(InMemoryTransactionRepository::new()));
        let result = use_case
            .execute(Uuid::new_v4(), Uuid::new_v4(), Status::Failed, None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
