use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::SubscriptionError;

/// Filters of the total cost query. A missing parameter is an empty string, which
/// compares like any other value.
#[derive(Deserialize, Debug)]
pub struct TotalCostParameters {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub service_name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TotalCostResponse {
    pub total_cost: i64,
}

#[tracing::instrument(
    name = "Computing the total cost handler",
    skip(db_pool, parameters),
    fields(
        user_id = %parameters.user_id,
        service_name = %parameters.service_name
    )
)]
pub async fn handle_total_cost(
    parameters: web::Query<TotalCostParameters>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let total_cost = get_total_cost(&parameters, db_pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(TotalCostResponse { total_cost }))
}

/// Sums the price of every subscription of the user for the service. Dates play
/// no part: ended subscriptions are counted too.
#[tracing::instrument(name = "Sum subscription prices in the database", skip(db_pool))]
async fn get_total_cost(
    parameters: &TotalCostParameters,
    db_pool: &PgPool,
) -> Result<i64, SubscriptionError> {
    // SUM over INTEGER is BIGINT and NULL when no row matches
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(SUM(price), 0)::BIGINT
        FROM subscriptions
        WHERE user_id = $1 AND service_name = $2
        "#,
    )
    .bind(&parameters.user_id)
    .bind(&parameters.service_name)
    .fetch_one(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        SubscriptionError::UnexpectedError(err)
    })
}
