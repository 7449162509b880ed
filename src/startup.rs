use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::net::TcpListener;
use std::path::PathBuf;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::email_client::EmailClient;
use crate::routes::{
    handle_inquiry, handle_list_subscribers, handle_subscribe, handle_unsubscribe, health_check,
    serve_frontend, MessageBody,
};

/// Directory the frontend entry page is served from.
pub struct FrontendPath(pub PathBuf);

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Sender email is not valid: {0}")]
    InvalidSender(String),
    #[error("Failed to build the email client")]
    EmailClient(#[from] reqwest::Error),
    #[error("Failed to bind the server")]
    Io(#[from] std::io::Error),
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, StartupError> {
        let db_pool = get_connection_db_pool(&config.database);
        let sender_email = config
            .get_email_client_sender()
            .map_err(StartupError::InvalidSender)?;
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            sender_email,
            config.get_email_client_sender_name(),
            config.get_email_client_api(),
            Some(config.get_email_client_timeout()),
        )?;

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}", listener.local_addr()?);

        let server = run(listener, db_pool, email_client, config.get_frontend_path())?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_client: EmailClient,
    frontend_path: PathBuf,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let email_client = web::Data::new(email_client);
    let frontend_path = web::Data::new(FrontendPath(frontend_path));

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .route("/test", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/inquiry", web::post().to(handle_inquiry))
                    .route("/newsletter", web::post().to(handle_subscribe))
                    .route("/unsubscribe", web::get().to(handle_list_subscribers))
                    .route("/unsubscribe", web::delete().to(handle_unsubscribe)),
            )
            .default_service(web::route().to(serve_frontend))
            .app_data(db_pool.clone())
            .app_data(email_client.clone())
            .app_data(frontend_path.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

// Malformed bodies and query strings answer with the same `{"message"}` shape as the handlers.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(MessageBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(MessageBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
