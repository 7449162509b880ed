use serde_json::Value;

use crate::domain::subscriber_email::SubscriberEmail;

/// Set of emails to remove from the newsletter, in the order they were requested.
#[derive(Debug)]
pub struct UnsubscribeRequest {
    pub emails: Vec<SubscriberEmail>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UnsubscribeRequestError {
    #[error("Invalid request format: users must be an array")]
    UsersNotAnArray,
}

impl TryFrom<Value> for UnsubscribeRequest {
    type Error = UnsubscribeRequestError;

    /// Expects `{"users": [{"email": "..."}, ...]}`. Entries without a usable `email`
    /// string are skipped, and so are emails that can never match a subscriber.
    /// Repeated emails are collapsed.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let users = body
            .get("users")
            .and_then(Value::as_array)
            .ok_or(UnsubscribeRequestError::UsersNotAnArray)?;

        let mut emails: Vec<SubscriberEmail> = Vec::with_capacity(users.len());

        for email in users
            .iter()
            .filter_map(|user| user.get("email").and_then(Value::as_str))
            .filter(|email| !email.is_empty())
            .filter_map(|email| SubscriberEmail::parse(email.to_string()).ok())
        {
            if !emails.contains(&email) {
                emails.push(email);
            }
        }

        Ok(UnsubscribeRequest { emails })
    }
}
