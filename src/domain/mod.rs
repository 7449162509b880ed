pub mod inquirer_name;
pub mod inquiry;
pub mod new_subscriber;
pub mod subscriber;
pub mod subscriber_email;
pub mod unsubscribe_request;
