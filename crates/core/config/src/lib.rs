#[macro_use]
extern crate log;

use std::time::Duration;

use cached::proc_macro::cached;
use config::{Config, ConfigError, File, FileFormat};
use devevent_result::{create_error, Result};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Environment variable holding the database connection string
pub const MONGODB_URI: &str = "MONGODB_URI";

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    load_env();

    RwLock::new(
        load(std::env::var(MONGODB_URI).ok()).expect("Failed to build configuration."),
    )
});

/// Load `.env.local` and `.env` into the process environment, existing variables win
fn load_env() {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();
}

/// Build the layered configuration, `mongodb_uri` overrides `database.mongodb`
pub fn load(mongodb_uri: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(File::from_str(
        include_str!("../DevEvent.toml"),
        FileFormat::Toml,
    ));

    if std::path::Path::new("DevEvent.toml").exists() {
        builder = builder.add_source(File::new("DevEvent.toml", FileFormat::Toml));
    }

    builder
        .set_override_option("database.mongodb", mongodb_uri)?
        .build()
}

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
    pub name: String,
    pub server_selection_timeout_ms: u64,
}

impl Database {
    /// Connection string, or a configuration error if none was provided
    pub fn connection_string(&self) -> Result<&str> {
        let uri = self.mongodb.trim();
        if uri.is_empty() {
            Err(create_error!(MissingConfiguration {
                key: MONGODB_URI.to_string()
            }))
        } else {
            Ok(uri)
        }
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Sentry {
    pub dsn: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub sentry: Sentry,
}

impl Settings {
    /// Check the values the process cannot run without
    pub fn preflight(&self) -> Result<()> {
        self.database.connection_string()?;
        Ok(())
    }
}

pub async fn init() {
    println!(
        ":: DevEvent Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read()
        .await
        .try_deserialize::<Settings>()
        .expect("Configuration does not match the expected shape.")
}

/// Refuse to start without the values the process cannot run without
pub async fn preflight_checks() -> Result<()> {
    config().await.preflight()
}

/// Configure logging and error reporting
///
/// The returned guard must be held for as long as events should reach Sentry.
pub async fn setup_logging() -> Option<sentry::ClientInitGuard> {
    load_env();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    if pretty_env_logger::try_init().is_err() {
        debug!("Logger was already initialised.");
    }

    let settings = config().await;
    if settings.sentry.dsn.is_empty() {
        return None;
    }

    info!("Reporting errors to Sentry.");
    Some(sentry::init((
        settings.sentry.dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
