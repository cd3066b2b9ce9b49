use config::{Config, ConfigError, File};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    ConnectOptions,
};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "_data/list.db";
const DEFAULT_JSON_BIND: &str = ":3000";
const DEFAULT_GRPC_BIND: &str = ":3001";
const DEFAULT_MAX_CONNECTIONS: i64 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub json_api: ServerSettings,
    pub grpc_api: ServerSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub path: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClientSettings {
    pub grpc_addr: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub email: Option<String>,
}

impl Settings {
    pub fn get_json_address(&self) -> String {
        self.json_api.get_address()
    }

    pub fn get_grpc_address(&self) -> String {
        self.grpc_api.get_address()
    }

    pub fn set_db_path(&mut self, path: String) {
        self.database.path = path;
    }

    pub fn set_json_bind(&mut self, bind: String) {
        self.json_api.bind = bind;
    }

    pub fn set_grpc_bind(&mut self, bind: String) {
        self.grpc_api.bind = bind;
    }
}

impl DatabaseSettings {
    pub fn get_db_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .log_statements(log::LevelFilter::Trace)
    }

    /// Directory holding the database file, when the path has one.
    pub fn get_parent_dir(&self) -> Option<PathBuf> {
        PathBuf::from(&self.path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

impl ServerSettings {
    pub fn get_address(&self) -> String {
        normalize_bind(&self.bind)
    }
}

impl ClientSettings {
    pub fn get_endpoint(&self) -> String {
        let address = match self.grpc_addr.strip_prefix(':') {
            Some(port) => format!("127.0.0.1:{}", port),
            None => self.grpc_addr.clone(),
        };

        format!("http://{}", address)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// `:3000` listens on every interface.
pub fn normalize_bind(bind: &str) -> String {
    match bind.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => bind.to_string(),
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
    let root_path = std::env::current_dir().map_err(|err| ConfigError::Foreign(Box::new(err)))?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let enviroment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    // Defaults, then the base file, then the environment file, then APP_* variables.
    // The MAILINGLIST_* variables win over everything else.
    let settings = Config::builder()
        .set_default("database.path", DEFAULT_DB_PATH)?
        .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS)?
        .set_default("json_api.bind", DEFAULT_JSON_BIND)?
        .set_default("grpc_api.bind", DEFAULT_GRPC_BIND)?
        .add_source(File::from(config_directory.join("base")).required(false))
        .add_source(File::from(config_directory.join(enviroment.as_str())).required(false))
        // E.g APP_DATABASE__PATH would set Settings.database.path
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .set_override_option("database.path", non_empty_var("MAILINGLIST_DB"))?
        .set_override_option("json_api.bind", non_empty_var("MAILINGLIST_BIND_JSON"))?
        .set_override_option("grpc_api.bind", non_empty_var("MAILINGLIST_BIND_GRPC"))?
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    settings.try_deserialize()
}

pub fn get_client_configuration() -> Result<ClientSettings, ConfigError> {
    Config::builder()
        .set_default("grpc_addr", DEFAULT_GRPC_BIND)?
        .set_default("timeout_milliseconds", 1000_i64)?
        .set_override_option("grpc_addr", non_empty_var("MAILINGLIST_GRPC_ADDR"))?
        .set_override_option("email", non_empty_var("MAILINGLIST_CLIENT_EMAIL"))?
        .build()?
        .try_deserialize()
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
