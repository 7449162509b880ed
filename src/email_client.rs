use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::subscriber_email::SubscriberEmail;
use crate::notifications::{Notification, Recipient};

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Outbound mail gateway. Every message is sent from the business identity,
/// one HTTP call per message, no retries.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SubscriberEmail,
    sender_name: String,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody<'a> {
    personalizations: Vec<SendGridPersonalization<'a>>,
    from: SendGridEmail<'a>,
    subject: &'a str,
    content: Vec<SendGridContent<'a>>,
}

#[derive(serde::Serialize)]
struct SendGridEmail<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct SendGridPersonalization<'a> {
    to: Vec<SendGridEmail<'a>>,
}

#[derive(serde::Serialize)]
struct SendGridContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmail,
        sender_name: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(EmailClient {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
        })
    }

    /// Name the business signs its emails with.
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Mailbox that receives the business copy of every notification.
    pub fn business_address(&self) -> &SubscriberEmail {
        &self.sender
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip(self, notification),
        fields(
            recipient = %self.resolve(&notification.to),
            subject = %notification.subject
        )
    )]
    pub async fn send_email(&self, notification: &Notification) -> Result<(), reqwest::Error> {
        let url = format!("{}/mail/send", self.base_url);
        let recipient = self.resolve(&notification.to);
        let body = SendEmailBody {
            from: SendGridEmail {
                email: self.sender.as_ref(),
                name: Some(&self.sender_name),
            },
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridEmail {
                    email: recipient.as_ref(),
                    name: None,
                }],
            }],
            subject: &notification.subject,
            content: vec![SendGridContent {
                content_type: "text/plain",
                value: &notification.text,
            }],
        };

        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }

    fn resolve<'a>(&'a self, recipient: &'a Recipient) -> &'a SubscriberEmail {
        match recipient {
            Recipient::Business => self.business_address(),
            Recipient::Address(email) => email,
        }
    }
}
