mod connection;
#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

use devevent_config::config;
use devevent_result::Result;
use rand::Rng;

pub use self::connection::*;
#[cfg(feature = "mongodb")]
pub use self::mongodb::*;
pub use self::reference::*;

/// Database information to use to create a client
#[derive(Clone)]
pub enum DatabaseInfo {
    /// Use the configured database
    Auto,
    /// Use the database selected by `TEST_DB` with an empty testing database
    Test(String),
    /// Use the mock database
    Reference,
    /// Connect to MongoDB
    #[cfg(feature = "mongodb")]
    MongoDb { uri: String, database_name: String },
}

/// Database
#[derive(Clone)]
pub enum Database {
    /// Mock database
    Reference(ReferenceDb),
    /// MongoDB database
    #[cfg(feature = "mongodb")]
    MongoDb(MongoDb),
}

impl DatabaseInfo {
    /// Create a database client from the given database information
    #[async_recursion]
    pub async fn connect(self) -> Result<Database> {
        let config = config().await;

        match self {
            DatabaseInfo::Auto => {
                if std::env::var("TEST_DB").is_ok() {
                    return DatabaseInfo::Test(format!(
                        "devevent_test_{}",
                        rand::thread_rng().gen_range(1_000_000..10_000_000)
                    ))
                    .connect()
                    .await;
                }

                let uri = config.database.connection_string()?.to_string();

                #[cfg(feature = "mongodb")]
                return DatabaseInfo::MongoDb {
                    uri,
                    database_name: config.database.name,
                }
                .connect()
                .await;

                #[cfg(not(feature = "mongodb"))]
                {
                    debug!("Ignoring connection string of {} bytes.", uri.len());
                    Err(create_error!(ConnectionFailed {
                        reason: "MongoDB not enabled.".to_string()
                    }))
                }
            }
            DatabaseInfo::Test(database_name) => {
                match std::env::var("TEST_DB")
                    .unwrap_or_else(|_| "REFERENCE".to_string())
                    .as_str()
                {
                    "REFERENCE" => DatabaseInfo::Reference.connect().await,
                    "MONGODB" => {
                        #[cfg(feature = "mongodb")]
                        return DatabaseInfo::MongoDb {
                            uri: config.database.connection_string()?.to_string(),
                            database_name: database_name.replace('.', "_"),
                        }
                        .connect()
                        .await;

                        #[cfg(not(feature = "mongodb"))]
                        return Err(create_error!(ConnectionFailed {
                            reason: format!("MongoDB not enabled for {database_name}.")
                        }));
                    }
                    _ => unreachable!("must specify REFERENCE or MONGODB"),
                }
            }
            DatabaseInfo::Reference => Ok(Database::Reference(Default::default())),
            #[cfg(feature = "mongodb")]
            DatabaseInfo::MongoDb { uri, database_name } => {
                let mut options = ::mongodb::options::ClientOptions::parse(&uri)
                    .await
                    .map_err(|err| {
                        create_error!(ConnectionFailed {
                            reason: err.to_string()
                        })
                    })?;

                // Fail operations quickly instead of queueing them behind server selection
                options.server_selection_timeout =
                    Some(config.database.server_selection_timeout());
                options
                    .app_name
                    .get_or_insert_with(|| "devevent".to_string());

                let client = ::mongodb::Client::with_options(options).map_err(|err| {
                    create_error!(ConnectionFailed {
                        reason: err.to_string()
                    })
                })?;

                let db = MongoDb(client, database_name);
                db.ping().await?;

                info!("Connected to MongoDB database `{}`.", db.1);
                Ok(Database::MongoDb(db))
            }
        }
    }
}
