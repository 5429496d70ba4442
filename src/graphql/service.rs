use crate::graphql::schema::{create_schema, GraphQLSchema};
use crate::storage::Storage;
use async_graphql::{Request, Response};
use std::sync::Arc;
use tracing::warn;

/// Entry point shared by the HTTP server and the Lambda handler.
///
/// Every request first makes sure the storage connection exists. A failed
/// connection is logged and the request still runs; resolvers that need the
/// store then report the connection error themselves.
#[derive(Clone)]
pub struct GraphQLService {
    schema: GraphQLSchema,
    storage: Arc<dyn Storage>,
}

impl GraphQLService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            schema: create_schema(storage.clone()),
            storage,
        }
    }

    pub fn schema(&self) -> &GraphQLSchema {
        &self.schema
    }

    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        if let Err(e) = self.storage.ensure_ready().await {
            warn!("Continuing without a database connection: {}", e);
        }
        self.schema.execute(request).await
    }
}
