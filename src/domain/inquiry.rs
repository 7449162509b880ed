use actix_web::web;
use serde::Deserialize;

use crate::domain::inquirer_name::InquirerName;
use crate::domain::subscriber_email::SubscriberEmail;

/// A contact form submission. Lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub name: InquirerName,
    pub email: SubscriberEmail,
    pub message: InquiryMessage,
}

#[derive(Debug, Clone)]
pub struct InquiryMessage(String);

impl InquiryMessage {
    pub fn parse(message: String) -> Result<InquiryMessage, String> {
        if message.trim().is_empty() {
            return Err(String::from("message cannot be empty"));
        }

        Ok(Self(message))
    }
}

impl AsRef<str> for InquiryMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
pub struct InquiryBody {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl TryFrom<web::Json<InquiryBody>> for Inquiry {
    type Error = String;

    fn try_from(body: web::Json<InquiryBody>) -> Result<Self, Self::Error> {
        let body = body.into_inner();
        let name = InquirerName::parse(body.name)?;
        let email = SubscriberEmail::parse(body.email)?;
        let message = InquiryMessage::parse(body.message)?;

        Ok(Inquiry {
            name,
            email,
            message,
        })
    }
}
