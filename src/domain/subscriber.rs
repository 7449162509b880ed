use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::subscriber_email::SubscriberEmail;

#[derive(Debug, serde::Serialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: SubscriberEmail,
    /// Optional listing tag. No write path sets it, so it stays `None` for every
    /// record created through the newsletter endpoint.
    pub date: Option<NaiveDate>,
    pub subscribed_at: DateTime<Utc>,
}

/// Criteria accepted when listing subscribers. An absent field matches everything.
#[derive(Debug, Default, serde::Deserialize)]
pub struct SubscriberFilter {
    pub date: Option<NaiveDate>,
}
