use crate::domain::inquiry::Inquiry;
use crate::email_client::EmailClient;
use crate::notifications::{dispatch, inquiry_received};

/// Forwards a contact form submission to the business and confirms it to the sender.
/// Nothing is persisted: either both emails go out or the whole submission fails.
#[tracing::instrument(
    name = "Submitting an inquiry",
    skip(email_client, inquiry),
    fields(inquirer_email = %inquiry.email)
)]
pub async fn submit_inquiry(
    email_client: &EmailClient,
    inquiry: &Inquiry,
) -> Result<(), reqwest::Error> {
    let notifications = inquiry_received(email_client.sender_name(), inquiry);

    dispatch(email_client, &notifications).await
}
