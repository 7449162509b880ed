use futures::future::join_all;
use sqlx::PgPool;

use crate::domain::{
    subscriber::{Subscriber, SubscriberFilter},
    subscriber_email::SubscriberEmail,
    unsubscribe_request::UnsubscribeRequest,
};
use crate::email_client::EmailClient;
use crate::notifications::{dispatch, subscription_confirmed, unsubscription_confirmed};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

impl SubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::Subscribed => "Newsletter Request Successful",
            SubscribeOutcome::AlreadySubscribed => "Already subscribed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    AlreadyUnsubscribed,
}

impl UnsubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            UnsubscribeOutcome::Unsubscribed => "Successfully unsubscribed user(s)",
            UnsubscribeOutcome::AlreadyUnsubscribed => "Already unsubscribed",
        }
    }
}

/// Adds `email` to the newsletter. The stored record is the success signal: confirmation
/// emails are best effort and a delivery failure is only logged.
#[tracing::instrument(name = "Subscribing to the newsletter", skip(db_pool, email_client))]
pub async fn subscribe(
    db_pool: &PgPool,
    email_client: &EmailClient,
    email: &SubscriberEmail,
) -> Result<SubscribeOutcome, sqlx::Error> {
    let subscriber = match store::insert_if_absent(db_pool, email).await? {
        Some(subscriber) => subscriber,
        None => {
            tracing::info!("{} is already subscribed", email);
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
    };

    tracing::info!("Subscriber {} saved", subscriber.id);

    let notifications = subscription_confirmed(email_client.sender_name(), email);

    if let Err(err) = dispatch(email_client, &notifications).await {
        tracing::error!(
            "Failed to send subscription emails for {}: {:?}",
            email,
            err
        );
    }

    Ok(SubscribeOutcome::Subscribed)
}

#[tracing::instrument(name = "Listing subscribers", skip(db_pool))]
pub async fn list_subscribers(
    db_pool: &PgPool,
    filter: &SubscriberFilter,
) -> Result<Vec<Subscriber>, sqlx::Error> {
    store::find(db_pool, filter).await
}

/// Removes every requested email from the newsletter. When at least one record was
/// deleted, every requested email gets its confirmation pair, concurrently across
/// emails and each failure logged without affecting the others.
#[tracing::instrument(
    name = "Unsubscribing from the newsletter",
    skip(db_pool, email_client, request),
    fields(requested = request.emails.len())
)]
pub async fn unsubscribe(
    db_pool: &PgPool,
    email_client: &EmailClient,
    request: &UnsubscribeRequest,
) -> Result<UnsubscribeOutcome, sqlx::Error> {
    if request.emails.is_empty() {
        return Ok(UnsubscribeOutcome::AlreadyUnsubscribed);
    }

    let deleted = store::delete_by_emails(db_pool, &request.emails).await?;

    tracing::info!("Deleted {} subscriber(s)", deleted);

    if deleted == 0 {
        return Ok(UnsubscribeOutcome::AlreadyUnsubscribed);
    }

    join_all(
        request
            .emails
            .iter()
            .map(|email| send_unsubscription_emails(email_client, email)),
    )
    .await;

    Ok(UnsubscribeOutcome::Unsubscribed)
}

async fn send_unsubscription_emails(email_client: &EmailClient, email: &SubscriberEmail) {
    let notifications = unsubscription_confirmed(email_client.sender_name(), email);

    match dispatch(email_client, &notifications).await {
        Ok(()) => tracing::info!("Cancellation emails sent for {}", email),
        Err(err) => tracing::error!(
            "Failed to send unsubscription emails for {}: {:?}",
            email,
            err
        ),
    }
}
