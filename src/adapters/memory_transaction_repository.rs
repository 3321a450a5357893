//! In-process transaction repository, used when no database is configured and in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{CategoryStat, Status, Transaction, TransactionStats};
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

#[derive(Clone, Default)]
pub struct InMemoryTransactionRepository {
    records: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, user_id: Uuid, filter: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        let records = self.records.read().await;
        let mut selected: Vec<Transaction> = records
            .values()
            .filter(|tx| tx.user_id == user_id && filter(tx))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        selected
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        self.records.write().await.insert(tx.id, tx.clone());
        Ok(tx.clone())
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> RepositoryResult<Transaction> {
        self.records
            .read()
            .await
            .get(&id)
            .filter(|tx| tx.user_id == user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn list_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        Ok(self.select(user_id, |_| true).await)
    }

    async fn list_flagged(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        Ok(self.select(user_id, |tx| tx.flagged).await)
    }

    async fn update_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: Status,
        transaction_id: Option<String>,
    ) -> RepositoryResult<Transaction> {
        let mut records = self.records.write().await;
        let tx = records
            .get_mut(&id)
            .filter(|tx| tx.user_id == user_id)
            .ok_or(RepositoryError::NotFound(id))?;

        tx.status = status;
        if transaction_id.is_some() {
            tx.transaction_id = transaction_id;
        }
        tx.updated_at = Utc::now();
        Ok(tx.clone())
    }

    async fn monthly_stats(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> RepositoryResult<TransactionStats> {
        let recent = self.select(user_id, |tx| tx.created_at >= since).await;

        let mut by_category: BTreeMap<&'static str, CategoryStat> = BTreeMap::new();
        let mut total_spent = BigDecimal::from(0);

        for tx in &recent {
            let stat = by_category
                .entry(tx.category.as_str())
                .or_insert_with(|| CategoryStat {
                    category: tx.category,
                    total: BigDecimal::from(0),
                    count: 0,
                });
            stat.total += &tx.amount;
            stat.count += 1;

            if tx.status == Status::Completed {
                total_spent += &tx.amount;
            }
        }

        Ok(TransactionStats {
            category_stats: by_category.into_values().collect(),
            total_spent,
        })
    }
}
