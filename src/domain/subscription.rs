use serde::{Deserialize, Serialize};

/// A stored row of the `subscriptions` table, also the JSON shape returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: String,
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}
