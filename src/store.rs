//! Subscriber persistence. Uniqueness of `email` is enforced by the table itself.

use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    subscriber::{Subscriber, SubscriberFilter},
    subscriber_email::SubscriberEmail,
};

const SUBSCRIBER_COLUMNS: &str = "id, email, date, subscribed_at";

fn subscriber_from_row(row: PgRow) -> Result<Subscriber, sqlx::Error> {
    let email = SubscriberEmail::parse(row.try_get("email")?)
        .map_err(|err| sqlx::Error::Decode(err.into()))?;

    Ok(Subscriber {
        id: row.try_get("id")?,
        email,
        date: row.try_get("date")?,
        subscribed_at: row.try_get("subscribed_at")?,
    })
}

/// Inserts the subscriber unless one with the same email already exists.
/// Returns `None` when the email was already present.
#[tracing::instrument(name = "Insert a subscriber if absent", skip(db_pool))]
pub async fn insert_if_absent(
    db_pool: &PgPool,
    email: &SubscriberEmail,
) -> Result<Option<Subscriber>, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO subscribers (id, email, subscribed_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING {}
        "#,
        SUBSCRIBER_COLUMNS
    );

    sqlx::query(&query)
        .bind(Uuid::new_v4())
        .bind(email.as_ref())
        .bind(Utc::now())
        .try_map(subscriber_from_row)
        .fetch_optional(db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })
}

#[tracing::instrument(name = "Find a subscriber by email", skip(db_pool))]
pub async fn find_by_email(
    db_pool: &PgPool,
    email: &SubscriberEmail,
) -> Result<Option<Subscriber>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM subscribers WHERE email = $1",
        SUBSCRIBER_COLUMNS
    );

    sqlx::query(&query)
        .bind(email.as_ref())
        .try_map(subscriber_from_row)
        .fetch_optional(db_pool)
        .await
}

/// Every subscriber matching the filter, oldest first.
#[tracing::instrument(name = "Find subscribers", skip(db_pool))]
pub async fn find(
    db_pool: &PgPool,
    filter: &SubscriberFilter,
) -> Result<Vec<Subscriber>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {}
        FROM subscribers
        WHERE ($1::date IS NULL OR date = $1)
        ORDER BY subscribed_at
        "#,
        SUBSCRIBER_COLUMNS
    );

    sqlx::query(&query)
        .bind(filter.date)
        .try_map(subscriber_from_row)
        .fetch_all(db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })
}

/// Deletes every subscriber whose email is in `emails`, returning how many went away.
#[tracing::instrument(name = "Delete subscribers by email", skip(db_pool))]
pub async fn delete_by_emails(
    db_pool: &PgPool,
    emails: &[SubscriberEmail],
) -> Result<u64, sqlx::Error> {
    let emails: Vec<String> = emails.iter().map(ToString::to_string).collect();

    let result = sqlx::query("DELETE FROM subscribers WHERE email = ANY($1)")
        .bind(emails)
        .execute(db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

    Ok(result.rows_affected())
}
