use actix_web::web;
use serde::Deserialize;

use crate::domain::subscriber_email::SubscriberEmail;

pub struct NewSubscriber {
    pub email: SubscriberEmail,
}

#[derive(Deserialize)]
pub struct NewSubscriberBody {
    pub email: String,
}

impl TryFrom<web::Json<NewSubscriberBody>> for NewSubscriber {
    type Error = String;

    fn try_from(body: web::Json<NewSubscriberBody>) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(body.into_inner().email)?;

        Ok(NewSubscriber { email })
    }
}
