//! Client-side view of the API: how the site's forms interpret responses.

use crate::routes::MessageBody;

/// Longest message the contact form lets through.
pub const INQUIRY_MESSAGE_MAX_CHARS: usize = 500;

const ALREADY_SUBSCRIBED: &str = "Already subscribed";
const ALREADY_UNSUBSCRIBED: &str = "Already unsubscribed";
const UNSUBSCRIBED: [&str; 2] = ["Successfully unsubscribed user(s)", "Unsubscribed successfully"];

/// Caps the contact form message the way the text area does while typing.
pub fn truncate_message(message: &str) -> String {
    message.chars().take(INQUIRY_MESSAGE_MAX_CHARS).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeState {
    Idle,
    Submitting,
    NotFound,
    Unsubscribed,
    Error,
}

impl UnsubscribeState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UnsubscribeState::NotFound | UnsubscribeState::Unsubscribed | UnsubscribeState::Error
        )
    }

    pub fn submit(self) -> UnsubscribeState {
        match self {
            UnsubscribeState::Idle => UnsubscribeState::Submitting,
            other => other,
        }
    }

    /// `response` is the decoded body, or `Err` when the request never completed.
    /// Only the message text is looked at, never the status code.
    pub fn on_response<E>(self, response: Result<&MessageBody, E>) -> UnsubscribeState {
        if self != UnsubscribeState::Submitting {
            return self;
        }

        match response {
            Ok(body) if body.message == ALREADY_UNSUBSCRIBED => UnsubscribeState::NotFound,
            Ok(body) if UNSUBSCRIBED.contains(&body.message.as_str()) => {
                UnsubscribeState::Unsubscribed
            }
            _ => UnsubscribeState::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterState {
    Subscribed,
    AlreadySubscribed,
    Failed,
}

impl NewsletterState {
    pub fn from_response(status: u16, body: &MessageBody) -> NewsletterState {
        if body.message == ALREADY_SUBSCRIBED {
            NewsletterState::AlreadySubscribed
        } else if (200..300).contains(&status) {
            NewsletterState::Subscribed
        } else {
            NewsletterState::Failed
        }
    }
}
