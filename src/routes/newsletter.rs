use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use sqlx::PgPool;

use crate::{
    domain::new_subscriber::{NewSubscriber, NewSubscriberBody},
    email_client::EmailClient,
    routes::{error_chain_fmt, MessageBody},
    services::subscriptions::subscribe,
};

#[tracing::instrument(
    name = "Newsletter subscription handler",
    skip(body, db_pool, email_client),
    fields(subscriber_email = %body.email)
)]
pub async fn handle_subscribe(
    body: web::Json<NewSubscriberBody>,
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, SubscribeError> {
    let new_subscriber: NewSubscriber = body.try_into().map_err(SubscribeError::ValidationError)?;

    let outcome = subscribe(&db_pool, &email_client, &new_subscriber.email)
        .await
        .map_err(SubscribeError::StoreError)?;

    Ok(HttpResponse::Ok().json(MessageBody::new(outcome.message())))
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Error submitting newsletter request")]
    StoreError(#[source] sqlx::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageBody::new(self.to_string()))
    }
}
