//! Postgres implementation of TransactionRepository.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::transaction::UnknownVariant;
use crate::domain::{CategoryStat, Status, Transaction, TransactionStats};
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

const COLUMNS: &str = "id, user_id, payee, amount, category, status, flagged, flag_reason, \
                       upi_id, transaction_id, created_at, updated_at";

/// Postgres-backed transaction repository.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (
                id, user_id, payee, amount, category, status, flagged, flag_reason,
                upi_id, transaction_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(tx.id)
        .bind(tx.user_id)
        .bind(&tx.payee)
        .bind(&tx.amount)
        .bind(tx.category.as_str())
        .bind(tx.status.as_str())
        .bind(tx.flagged)
        .bind(&tx.flag_reason)
        .bind(&tx.upi_id)
        .bind(&tx.transaction_id)
        .bind(tx.created_at)
        .bind(tx.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_domain()
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound(id))?.into_domain()
    }

    async fn list_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn list_flagged(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE user_id = $1 AND flagged ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: Status,
        transaction_id: Option<String>,
    ) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions
            SET status = $1,
                transaction_id = COALESCE($2, transaction_id),
                updated_at = NOW()
            WHERE id = $3 AND user_id = $4
            RETURNING {COLUMNS}
            "#
        ))
        .bind(status.as_str())
        .bind(transaction_id)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound(id))?.into_domain()
    }

    async fn monthly_stats(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepositoryResult<TransactionStats> {
        let groups = sqlx::query_as::<_, (String, BigDecimal, i64)>(
            r#"
            SELECT category, SUM(amount), COUNT(*)
            FROM transactions
            WHERE user_id = $1 AND created_at >= $2
            GROUP BY category
            ORDER BY category
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let total_spent: Option<BigDecimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(amount)
            FROM transactions
            WHERE user_id = $1 AND status = 'completed' AND created_at >= $2
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        let category_stats = groups
            .into_iter()
            .map(|(category, total, count)| {
                Ok(CategoryStat {
                    category: category
                        .parse()
                        .map_err(|e: UnknownVariant| RepositoryError::Corrupt(e.to_string()))?,
                    total,
                    count,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(TransactionStats {
            category_stats,
            total_spent: total_spent.unwrap_or_else(|| BigDecimal::from(0)),
        })
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    payee: String,
    amount: BigDecimal,
    category: String,
    status: String,
    flagged: bool,
    flag_reason: Option<String>,
    upi_id: Option<String>,
    transaction_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> RepositoryResult<Transaction> {
        let id = self.id;
        let corrupt = move |e: UnknownVariant| RepositoryError::Corrupt(format!("transaction {id}: {e}"));

        Ok(Transaction {
            id: self.id,
            user_id: self.user_id,
            category: self.category.parse().map_err(corrupt)?,
            status: self.status.parse().map_err(corrupt)?,
            payee: self.payee,
            amount: self.amount,
            flagged: self.flagged,
            flag_reason: self.flag_reason,
            upi_id: self.upi_id,
            transaction_id: self.transaction_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
