use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

use crate::{
    domain::inquiry::{Inquiry, InquiryBody},
    email_client::EmailClient,
    routes::{error_chain_fmt, MessageBody},
    services::inquiry::submit_inquiry,
};

#[tracing::instrument(
    name = "Contact form inquiry handler",
    skip(body, email_client),
    fields(
        inquirer_email = %body.email,
        inquirer_name = %body.name
    )
)]
pub async fn handle_inquiry(
    body: web::Json<InquiryBody>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, InquiryError> {
    let inquiry: Inquiry = body.try_into().map_err(InquiryError::ValidationError)?;

    submit_inquiry(&email_client, &inquiry)
        .await
        .map_err(InquiryError::NotificationError)?;

    Ok(HttpResponse::Ok().json(MessageBody::new("Your message has been sent successfully!")))
}

#[derive(thiserror::Error)]
pub enum InquiryError {
    #[error("{0}")]
    ValidationError(String),
    #[error("There was an error sending your message. Please try again later.")]
    NotificationError(#[source] reqwest::Error),
}

impl std::fmt::Debug for InquiryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for InquiryError {
    fn status_code(&self) -> StatusCode {
        match self {
            InquiryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            InquiryError::NotificationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageBody::new(self.to_string()))
    }
}
