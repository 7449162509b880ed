use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};
use std::path::PathBuf;
use std::time;

use crate::domain::subscriber_email::SubscriberEmail;

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // Directory holding the built presentation bundle (index.html and assets)
    pub frontend_path: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub name: String,
    pub require_ssl: bool,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn get_frontend_path(&self) -> PathBuf {
        self.application.get_frontend_path()
    }

    pub fn get_email_client_sender(&self) -> Result<SubscriberEmail, String> {
        self.email_client.get_sender_email()
    }

    pub fn get_email_client_sender_name(&self) -> String {
        self.email_client.sender_name.clone()
    }

    pub fn get_email_client_base_url(&self) -> String {
        self.email_client.get_base_url()
    }

    pub fn get_email_client_api(&self) -> Secret<String> {
        self.email_client.get_api_key()
    }

    pub fn get_email_client_timeout(&self) -> time::Duration {
        self.email_client.get_timeout()
    }

    pub fn set_email_client_base_url(&mut self, new_base_url: String) {
        self.email_client.set_base_url(new_base_url)
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn set_frontend_path(&mut self, frontend_path: String) {
        self.application.frontend_path = frontend_path;
    }
}

impl DatabaseSettings {
    pub fn get_db_options(&self) -> PgConnectOptions {
        let mut db_options = self.get_server_options().database(&self.name);

        db_options.log_statements(tracing::log::LevelFilter::Trace);

        db_options
    }

    /// Connection options without a database selected, used to create databases.
    pub fn get_server_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .password(self.password.expose_secret())
            .username(&self.username)
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn set_name(&mut self, new_db_name: String) {
        self.name = new_db_name
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }

    pub fn get_frontend_path(&self) -> PathBuf {
        PathBuf::from(&self.frontend_path)
    }
}

impl EmailClientSettings {
    pub fn get_sender_email(&self) -> Result<SubscriberEmail, String> {
        SubscriberEmail::parse(self.sender_email.clone())
    }

    pub fn get_base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn get_api_key(&self) -> Secret<String> {
        self.api_key.clone()
    }

    pub fn get_timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn set_base_url(&mut self, new_base_url: String) {
        self.base_url = new_base_url
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", err))
    })?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(environment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_DATABASE__HOST would set Settings.database.host
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", environment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
