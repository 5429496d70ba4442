use crate::config::DatabaseConfig;
use crate::error::{ApiError, Result};
use crate::metrics::DbMetrics;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

/// Opens a connection handle. Implemented for MongoDB and by test doubles.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Send + Sync;

    async fn connect(&self) -> Result<Self::Handle>;
}

/// Process-wide connection handle, opened on first use.
///
/// Concurrent first callers wait on the same initialization, so at most one
/// connection is opened. A failed attempt is not cached: the next caller
/// tries again. An established handle is never health-checked or replaced.
pub struct LazyConnection<C: Connector> {
    connector: C,
    handle: OnceCell<C::Handle>,
}

impl<C: Connector> LazyConnection<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            handle: OnceCell::new(),
        }
    }

    /// Return the cached handle, connecting if there is none yet.
    pub async fn get(&self) -> Result<&C::Handle> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }

        self.handle
            .get_or_try_init(|| async {
                match self.connector.connect().await {
                    Ok(handle) => {
                        DbMetrics::record_connection_opened();
                        Ok(handle)
                    }
                    Err(e) => {
                        DbMetrics::record_connection_failed();
                        error!("Error while connecting to the database: {}", e);
                        Err(e)
                    }
                }
            })
            .await
    }

    /// The established handle. Never starts a connection attempt.
    pub fn current(&self) -> Result<&C::Handle> {
        self.handle.get().ok_or_else(|| ApiError::Connection {
            message: "no database connection has been established".to_string(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }
}

/// Connects to MongoDB and verifies the deployment answers a `ping`.
pub struct MongoConnector {
    uri: String,
    database: String,
}

impl MongoConnector {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.uri.clone(), config.name.clone())
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;

    async fn connect(&self) -> Result<Database> {
        if self.uri.is_empty() {
            return Err(ApiError::Connection {
                message: "MONGO_DB_URI is not set".to_string(),
            });
        }

        debug!("Opening MongoDB client for database '{}'", self.database);
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| ApiError::Connection {
                message: format!("Failed to create client: {e}"),
            })?;

        let database = client.database(&self.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ApiError::Connection {
                message: format!("Failed to reach database: {e}"),
            })?;

        info!("Connected to MongoDB database '{}'", self.database);
        Ok(database)
    }
}

pub type DatabaseManager = LazyConnection<MongoConnector>;

impl DatabaseManager {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        LazyConnection::new(MongoConnector::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingConnector {
        attempts: Arc<AtomicUsize>,
        fail_first: usize,
    }

    #[async_trait]
    impl Connector for CountingConnector {
        type Handle = usize;

        async fn connect(&self) -> Result<usize> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            // Give other callers a chance to race the initialization.
            tokio::time::sleep(Duration::from_millis(20)).await;
            if attempt <= self.fail_first {
                return Err(ApiError::Connection {
                    message: format!("attempt {attempt} refused"),
                });
            }
            Ok(attempt)
        }
    }

    fn lazy(fail_first: usize) -> (Arc<LazyConnection<CountingConnector>>, Arc<AtomicUsize>) {
        let attempts = Arc::new(AtomicUsize::new(0));
        let connection = LazyConnection::new(CountingConnector {
            attempts: attempts.clone(),
            fail_first,
        });
        (Arc::new(connection), attempts)
    }

    #[tokio::test]
    async fn concurrent_first_calls_connect_once() {
        let (connection, attempts) = lazy(0);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let connection = connection.clone();
                tokio::spawn(async move { *connection.get().await.unwrap() })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), 1);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(connection.is_connected());
    }

    #[tokio::test]
    async fn failed_connection_is_not_cached() {
        let (connection, attempts) = lazy(1);

        let err = connection.get().await.unwrap_err();
        assert_eq!(err.code(), "CONNECTION_FAILURE");
        assert!(!connection.is_connected());

        assert_eq!(*connection.get().await.unwrap(), 2);
        assert_eq!(*connection.get().await.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn current_does_not_reconnect_after_a_failure() {
        let (connection, attempts) = lazy(1);

        assert!(connection.get().await.is_err());
        let err = connection.current().unwrap_err();
        assert_eq!(err.code(), "CONNECTION_FAILURE");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        connection.get().await.unwrap();
        assert_eq!(*connection.current().unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_uri_fails_without_network() {
        let manager = DatabaseManager::from_config(&DatabaseConfig {
            uri: String::new(),
            name: "next-graphql".to_string(),
        });
        assert!(matches!(
            manager.get().await,
            Err(ApiError::Connection { .. })
        ));
    }
}
