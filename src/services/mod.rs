pub mod inquiry;
pub mod subscriptions;
