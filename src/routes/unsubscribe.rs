use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use sqlx::PgPool;

use crate::{
    domain::{
        subscriber::SubscriberFilter,
        unsubscribe_request::{UnsubscribeRequest, UnsubscribeRequestError},
    },
    email_client::EmailClient,
    routes::{error_chain_fmt, MessageBody},
    services::subscriptions::{list_subscribers, unsubscribe},
};

#[tracing::instrument(
    name = "List subscribers handler",
    skip(filter, db_pool),
    fields(date = ?filter.date)
)]
pub async fn handle_list_subscribers(
    filter: web::Query<SubscriberFilter>,
    db_pool: web::Data<PgPool>,
) -> Result<HttpResponse, ListSubscribersError> {
    let subscribers = list_subscribers(&db_pool, &filter)
        .await
        .map_err(ListSubscribersError::StoreError)?;

    Ok(HttpResponse::Ok().json(subscribers))
}

#[tracing::instrument(name = "Unsubscribe handler", skip(body, db_pool, email_client))]
pub async fn handle_unsubscribe(
    body: web::Json<serde_json::Value>,
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, UnsubscribeError> {
    let request = UnsubscribeRequest::try_from(body.into_inner())?;

    let outcome = unsubscribe(&db_pool, &email_client, &request)
        .await
        .map_err(UnsubscribeError::StoreError)?;

    Ok(HttpResponse::Ok().json(MessageBody::new(outcome.message())))
}

#[derive(thiserror::Error)]
pub enum ListSubscribersError {
    #[error("Failed to fetch users")]
    StoreError(#[source] sqlx::Error),
}

impl std::fmt::Debug for ListSubscribersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ListSubscribersError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageBody::new(self.to_string()))
    }
}

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error(transparent)]
    InvalidRequest(#[from] UnsubscribeRequestError),
    #[error("Failed to delete user(s)")]
    StoreError(#[source] sqlx::Error),
}

impl std::fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            UnsubscribeError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageBody::new(self.to_string()))
    }
}
