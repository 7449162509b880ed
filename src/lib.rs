pub mod config;
pub mod domain;
pub mod email_client;
pub mod notifications;
pub mod presentation;
pub mod routes;
pub mod services;
pub mod startup;
pub mod store;
pub mod telemetry;
