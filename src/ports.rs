//! Storage port for transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Status, Transaction, TransactionStats};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("transaction {0} not found")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persists transactions. Risk classification has already happened by the
/// time a record reaches the repository.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> RepositoryResult<Transaction>;

    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>>;

    /// Flagged transactions only, newest first.
    async fn list_flagged(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>>;

    /// Sets `status` and, when given, the external payment reference.
    /// `flagged` and `flag_reason` are left as they were.
    async fn update_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: Status,
        transaction_id: Option<String>,
    ) -> RepositoryResult<Transaction>;

    async fn monthly_stats(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepositoryResult<TransactionStats>;
}
