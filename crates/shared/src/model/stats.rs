use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One `GROUP BY` bucket of a dashboard count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct StatusTally {
    pub status: String,
    pub total: i64,
}
