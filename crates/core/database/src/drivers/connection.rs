use std::sync::Arc;

use devevent_result::Result;
use futures::future::{BoxFuture, FutureExt, Shared};
use futures::lock::Mutex;

use crate::{Database, DatabaseInfo};

/// Something which can open a new database connection
#[async_trait]
pub trait Connector: Sync + Send {
    /// Open a new connection
    async fn open(&self) -> Result<Database>;
}

#[async_trait]
impl Connector for DatabaseInfo {
    async fn open(&self) -> Result<Database> {
        self.clone().connect().await
    }
}

type PendingConnection = Shared<BoxFuture<'static, Result<Database>>>;

#[derive(Default)]
struct ConnectionState {
    /// Established connection, handed out to every caller
    connection: Option<Database>,
    /// Attempt currently in flight, awaited by every caller that arrives before it settles
    pending: Option<PendingConnection>,
}

/// Process-wide database connection
///
/// Construct one at startup and share it (it is cheap to clone) with everything
/// that talks to the database. The first call to [`ConnectionManager::get`] opens
/// the connection; concurrent callers wait on that same attempt rather than opening
/// their own. A failed attempt is forgotten so the next call starts over.
#[derive(Clone)]
pub struct ConnectionManager {
    connector: Arc<dyn Connector>,
    state: Arc<Mutex<ConnectionState>>,
}

impl ConnectionManager {
    /// Create a manager which opens connections through the given connector
    pub fn new<C: Connector + 'static>(connector: C) -> ConnectionManager {
        ConnectionManager {
            connector: Arc::new(connector),
            state: Default::default(),
        }
    }

    /// Create a manager for the configured database
    ///
    /// Fails if no connection string is configured, in which case the process
    /// should not start.
    pub async fn from_config() -> Result<ConnectionManager> {
        if std::env::var("TEST_DB").is_err() {
            devevent_config::preflight_checks().await?;
        }

        Ok(ConnectionManager::new(DatabaseInfo::Auto))
    }

    /// Connection if one has already been established
    pub async fn cached(&self) -> Option<Database> {
        self.state.lock().await.connection.clone()
    }

    /// Get the shared connection, opening it if necessary
    pub async fn get(&self) -> Result<Database> {
        let attempt = {
            let mut state = self.state.lock().await;
            if let Some(connection) = &state.connection {
                return Ok(connection.clone());
            }

            if let Some(attempt) = state.pending.clone() {
                debug!("Waiting on in-flight database connection attempt.");
                attempt
            } else {
                info!("Opening database connection.");
                let connector = self.connector.clone();
                let attempt = async move { connector.open().await }.boxed().shared();
                state.pending = Some(attempt.clone());
                attempt
            }
        };

        let result = attempt.clone().await;

        let mut state = self.state.lock().await;
        if state
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ptr_eq(&attempt))
        {
            state.pending = None;
        }

        match &result {
            Ok(connection) => {
                if state.connection.is_none() {
                    state.connection = Some(connection.clone());
                }
            }
            Err(err) => warn!("Database connection attempt failed: {err}"),
        }

        result
    }
}
