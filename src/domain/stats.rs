//! Monthly spending summary shown on the learner and mentor dashboards.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::transaction::Category;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: Category,
    #[schema(value_type = String)]
    pub total: BigDecimal,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    /// Every transaction recorded since the start of the month, by category.
    pub category_stats: Vec<CategoryStat>,
    /// Sum of completed transactions since the start of the month.
    #[schema(value_type = String)]
    pub total_spent: BigDecimal,
}

/// Midnight UTC on the first day of `now`'s month.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
