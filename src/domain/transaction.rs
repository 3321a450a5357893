//! Transaction domain entity.
//! Framework-agnostic representation of a learner's payment record.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::risk::{self, RiskVerdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bills,
    Healthcare,
    Groceries,
    Transfer,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bills,
        Category::Healthcare,
        Category::Groceries,
        Category::Transfer,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bills => "bills",
            Category::Healthcare => "healthcare",
            Category::Groceries => "groceries",
            Category::Transfer => "transfer",
            Category::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Completed, Status::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
            Status::Failed => "failed",
        }
    }
}

/// Returned when a stored or user-supplied enum value is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields of a transaction, before risk classification.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub payee: String,
    pub amount: BigDecimal,
    pub category: Category,
    pub upi_id: Option<String>,
}

/// Domain entity representing a transaction.
///
/// `flagged` and `flag_reason` are derived by [`risk::classify`] when the
/// record is created and are never accepted from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub payee: String,
    #[schema(value_type = String, example = "450.00")]
    pub amount: BigDecimal,
    pub category: Category,
    pub status: Status,
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a pending transaction and stamps it with the risk verdict.
    pub fn new(input: NewTransaction) -> Self {
        let verdict = risk::classify(&input.amount, &input.payee);
        Self::with_verdict(input, verdict)
    }

    pub fn with_verdict(input: NewTransaction, verdict: RiskVerdict) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            payee: input.payee,
            amount: input.amount,
            category: input.category,
            status: Status::Pending,
            flagged: verdict.flagged,
            flag_reason: verdict.reason.map(|r| r.as_str().to_string()),
            upi_id: input.upi_id,
            transaction_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
