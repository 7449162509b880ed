use std::fmt;
use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: String) -> Result<SubscriberEmail, String> {
        let is_valid_email = validate_email(&email);

        if !is_valid_email {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
