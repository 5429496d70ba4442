mod in_memory;
mod mongo;

pub use in_memory::InMemoryStorage;
pub use mongo::MongoStorage;

use crate::domain::{Band, BandFields, TaxonomyEntry, TaxonomyKind, User, UserFields};
use crate::error::Result;
use crate::search::Search;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Document store operations behind the GraphQL resolvers.
///
/// Lookups return `Ok(None)` / `Ok(false)` for unknown ids; the resolvers
/// turn those into `NotFound`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Make sure the backend is reachable before a request is executed.
    async fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    // Band operations
    async fn list_bands(&self) -> Result<Vec<Band>>;
    async fn get_band(&self, id: ObjectId) -> Result<Option<Band>>;
    async fn search_bands(&self, search: &Search) -> Result<Vec<Band>>;
    async fn insert_band(&self, band: Band) -> Result<Band>;
    async fn update_band(&self, id: ObjectId, fields: BandFields) -> Result<Option<Band>>;
    async fn delete_band(&self, id: ObjectId) -> Result<bool>;

    // User operations
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: ObjectId) -> Result<Option<User>>;
    async fn search_users(&self, search: &Search) -> Result<Vec<User>>;
    async fn insert_user(&self, user: User) -> Result<User>;
    async fn update_user(&self, id: ObjectId, fields: UserFields) -> Result<Option<User>>;
    async fn delete_user(&self, id: ObjectId) -> Result<bool>;

    // Lookup lists
    async fn list_taxonomy(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyEntry>>;
}
