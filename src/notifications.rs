//! Transactional email templates. Each event produces a pair of messages, one for
//! the person who triggered it and one for the business mailbox.

use crate::domain::inquiry::Inquiry;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::email_client::EmailClient;

#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    /// The business mailbox, which is also the sender address.
    Business,
    Address(SubscriberEmail),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub to: Recipient,
    pub subject: String,
    pub text: String,
}

/// Business copy first, then the confirmation echoing the message back.
pub fn inquiry_received(business: &str, inquiry: &Inquiry) -> [Notification; 2] {
    let name = inquiry.name.as_ref();
    let email = inquiry.email.as_ref();
    let message = inquiry.message.as_ref();

    [
        Notification {
            to: Recipient::Business,
            subject: format!("New Inquiry from {} Website", business),
            text: format!(
                "New Inquiry Received:\n\nName: {}\nEmail: {}\nMessage: {}",
                name, email, message
            ),
        },
        Notification {
            to: Recipient::Address(inquiry.email.clone()),
            subject: String::from("Thank You for Contacting Us"),
            text: format!(
                "Dear {},\n\nThank you for reaching out to us. We have received your message and will get back to you shortly.\n\nHere is a copy of your message:\n{}\n\nBest regards,\n{} Team",
                name, message, business
            ),
        },
    ]
}

pub fn subscription_confirmed(business: &str, email: &SubscriberEmail) -> [Notification; 2] {
    [
        Notification {
            to: Recipient::Address(email.clone()),
            subject: String::from("Newsletter Confirmation"),
            text: format!(
                "Dear subscriber,\n\nThank you for subscribing to our newsletter! We will keep you updated with the latest news and offers.\n\nBest regards,\n{} Team",
                business
            ),
        },
        Notification {
            to: Recipient::Business,
            subject: String::from("New Newsletter Subscription"),
            text: format!("New Subscription Received:\n\nEmail: {}", email),
        },
    ]
}

pub fn unsubscription_confirmed(business: &str, email: &SubscriberEmail) -> [Notification; 2] {
    [
        Notification {
            to: Recipient::Address(email.clone()),
            subject: String::from("Unsubscribe Confirmation"),
            text: format!(
                "Dear subscriber,\n\nYou have successfully unsubscribed from our newsletter.\n\nIf you have any questions, feel free to reach out.\n\nBest regards,\n{} Team",
                business
            ),
        },
        Notification {
            to: Recipient::Business,
            subject: String::from("Someone Unsubscribed from the Newsletter"),
            text: format!("Unsubscription Received:\n\nEmail: {}", email),
        },
    ]
}

/// Sends the messages in order, stopping at the first failure. Messages already
/// delivered stay delivered.
pub async fn dispatch(
    email_client: &EmailClient,
    notifications: &[Notification],
) -> Result<(), reqwest::Error> {
    for notification in notifications {
        email_client.send_email(notification).await?;
    }

    Ok(())
}
