pub mod mutation;
pub mod query;

pub use mutation::Mutation;
pub use query::Query;

use crate::domain::parse_object_id;
use crate::error::{ApiError, Result};
use crate::metrics::GraphQLMetrics;
use async_graphql::{ErrorExtensions, FieldResult, ID};
use mongodb::bson::oid::ObjectId;
use tracing::{debug, error};

/// Resolve a GraphQL id; ids that cannot be parsed do not resolve to anything.
pub(crate) fn object_id(entity: &'static str, id: &ID) -> Result<ObjectId> {
    parse_object_id(id).ok_or_else(|| ApiError::not_found(entity, id.as_str()))
}

/// Record the outcome of `operation` and turn failures into GraphQL errors.
pub(crate) fn respond<T>(operation: &'static str, result: Result<T>) -> FieldResult<T> {
    GraphQLMetrics::record(operation, &result);
    result.map_err(|e| {
        match &e {
            ApiError::NotFound { id, .. } => debug!("{}: no document with id {}", operation, id),
            _ => error!("{} failed: {}", operation, e),
        }
        e.extend()
    })
}
