use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::{
    domain::{
        new_subscription::{NewSubscription, SubscriptionBody},
        subscription::Subscription,
    },
    error::SubscriptionError,
};

// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[tracing::instrument(
    name = "Creating a new subscription handler",
    skip(body, db_pool),
    fields(
        service_name = ?body.service_name,
        user_id = ?body.user_id
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<SubscriptionBody>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let new_subscription: NewSubscription = body.into_inner().try_into().map_err(|err| {
        tracing::error!("Validation error: {:?}", err);
        SubscriptionError::ValidationError(err)
    })?;

    let subscription = insert_subscription(&new_subscription, db_pool.get_ref()).await?;

    tracing::info!(subscription_id = %subscription.id, "Subscription created");

    Ok(HttpResponse::Created().json(subscription))
}

#[tracing::instrument(name = "Listing subscriptions handler", skip(db_pool))]
pub async fn handle_list_subscriptions(
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscriptions = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, service_name, price, user_id, start_date, end_date
        FROM subscriptions
        "#,
    )
    .fetch_all(db_pool.get_ref())
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        SubscriptionError::UnexpectedError(err)
    })?;

    Ok(HttpResponse::Ok().json(subscriptions))
}

#[tracing::instrument(
    name = "Getting a subscription handler",
    skip(path, db_pool),
    fields(subscription_id = %path)
)]
pub async fn handle_get_subscription(
    path: web::Path<String>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscription = get_subscription(&path, db_pool.get_ref())
        .await?
        .ok_or(SubscriptionError::NotFound)?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(
    name = "Updating a subscription handler",
    skip(path, body, db_pool),
    fields(subscription_id = %path)
)]
pub async fn handle_update_subscription(
    path: web::Path<String>,
    body: web::Json<SubscriptionBody>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let existing = get_subscription(&path, db_pool.get_ref())
        .await?
        .ok_or(SubscriptionError::NotFound)?;

    let updated_subscription =
        NewSubscription::merge(existing, body.into_inner()).map_err(|err| {
            tracing::error!("Validation error: {:?}", err);
            SubscriptionError::ValidationError(err)
        })?;

    // The row may have been deleted between the read and the write
    let subscription = update_subscription(&updated_subscription, db_pool.get_ref())
        .await?
        .ok_or(SubscriptionError::NotFound)?;

    tracing::info!("Subscription updated");

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(
    name = "Deleting a subscription handler",
    skip(path, db_pool),
    fields(subscription_id = %path)
)]
pub async fn handle_delete_subscription(
    path: web::Path<String>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, SubscriptionError> {
    let deleted_rows = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
        .bind(path.as_str())
        .execute(db_pool.get_ref())
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            SubscriptionError::UnexpectedError(err)
        })?
        .rows_affected();

    if deleted_rows == 0 {
        return Err(SubscriptionError::NotFound);
    }

    tracing::info!("Subscription deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(name = "Fetch a subscription from the database", skip(db_pool))]
async fn get_subscription(
    id: &str,
    db_pool: &PgPool,
) -> Result<Option<Subscription>, SubscriptionError> {
    sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, service_name, price, user_id, start_date, end_date
        FROM subscriptions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        SubscriptionError::UnexpectedError(err)
    })
}

#[tracing::instrument(
    name = "Insert a new subscription into the database",
    skip(new_subscription, db_pool),
    fields(subscription_id = %new_subscription.id)
)]
async fn insert_subscription(
    new_subscription: &NewSubscription,
    db_pool: &PgPool,
) -> Result<Subscription, SubscriptionError> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (id, service_name, price, user_id, start_date, end_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, service_name, price, user_id, start_date, end_date
        "#,
    )
    .bind(new_subscription.id.as_ref())
    .bind(new_subscription.service_name.as_ref())
    .bind(new_subscription.price.value())
    .bind(new_subscription.user_id.as_ref())
    .bind(new_subscription.start_date.as_ref())
    .bind(new_subscription.end_date.as_ref().map(|date| date.as_ref()))
    .fetch_one(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);

        if is_unique_violation(&err) {
            return SubscriptionError::AlreadyExists(new_subscription.id.to_string());
        }

        SubscriptionError::UnexpectedError(err)
    })
}

#[tracing::instrument(
    name = "Update a subscription in the database",
    skip(subscription, db_pool),
    fields(subscription_id = %subscription.id)
)]
async fn update_subscription(
    subscription: &NewSubscription,
    db_pool: &PgPool,
) -> Result<Option<Subscription>, SubscriptionError> {
    sqlx::query_as::<_, Subscription>(
        r#"
        UPDATE subscriptions
        SET service_name = $2, price = $3, user_id = $4, start_date = $5, end_date = $6
        WHERE id = $1
        RETURNING id, service_name, price, user_id, start_date, end_date
        "#,
    )
    .bind(subscription.id.as_ref())
    .bind(subscription.service_name.as_ref())
    .bind(subscription.price.value())
    .bind(subscription.user_id.as_ref())
    .bind(subscription.start_date.as_ref())
    .bind(subscription.end_date.as_ref().map(|date| date.as_ref()))
    .fetch_optional(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        SubscriptionError::UnexpectedError(err)
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
