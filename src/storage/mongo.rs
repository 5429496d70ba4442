use super::Storage;
use crate::config::DatabaseConfig;
use crate::db::DatabaseManager;
use crate::domain::{Band, BandFields, TaxonomyEntry, TaxonomyKind, User, UserFields};
use crate::error::Result;
use crate::search::Search;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

const BANDS: &str = "bands";
const USERS: &str = "users";

/// MongoDB-backed storage. The connection is opened by `ensure_ready` and
/// shared by every clone of the owning `Arc`. Collection operations only use
/// an established connection and fail with `Connection` while there is none.
pub struct MongoStorage {
    db: DatabaseManager,
}

impl MongoStorage {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(DatabaseManager::from_config(config))
    }

    fn collection<T>(&self, name: &str) -> Result<Collection<T>>
    where
        T: Send + Sync,
    {
        Ok(self.db.current()?.collection::<T>(name))
    }

    async fn find_all<T>(&self, name: &str, filter: Document) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let collection = self.collection::<T>(name)?;
        let cursor = collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id<T>(&self, name: &str, id: ObjectId) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let collection = self.collection::<T>(name)?;
        Ok(collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert<T>(&self, name: &str, document: &T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let collection = self.collection::<T>(name)?;
        collection.insert_one(document).await?;
        Ok(())
    }

    async fn merge<T>(&self, name: &str, id: ObjectId, set: Document) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let collection = self.collection::<T>(name)?;
        Ok(collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn remove(&self, name: &str, id: ObjectId) -> Result<bool> {
        let collection = self.collection::<Document>(name)?;
        let result = collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl Storage for MongoStorage {
    async fn ensure_ready(&self) -> Result<()> {
        self.db.get().await.map(|_| ())
    }

    async fn list_bands(&self) -> Result<Vec<Band>> {
        self.find_all(BANDS, doc! {}).await
    }

    async fn get_band(&self, id: ObjectId) -> Result<Option<Band>> {
        self.find_by_id(BANDS, id).await
    }

    async fn search_bands(&self, search: &Search) -> Result<Vec<Band>> {
        let filter = search.to_filter();
        debug!("Searching bands with filter {}", filter);
        self.find_all(BANDS, filter).await
    }

    async fn insert_band(&self, band: Band) -> Result<Band> {
        self.insert(BANDS, &band).await?;
        info!("Created band with id {}", band.id);
        Ok(band)
    }

    async fn update_band(&self, id: ObjectId, fields: BandFields) -> Result<Option<Band>> {
        self.merge(BANDS, id, fields.to_set_document()?).await
    }

    async fn delete_band(&self, id: ObjectId) -> Result<bool> {
        self.remove(BANDS, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.find_all(USERS, doc! {}).await
    }

    async fn get_user(&self, id: ObjectId) -> Result<Option<User>> {
        self.find_by_id(USERS, id).await
    }

    async fn search_users(&self, search: &Search) -> Result<Vec<User>> {
        let filter = search.to_filter();
        debug!("Searching users with filter {}", filter);
        self.find_all(USERS, filter).await
    }

    async fn insert_user(&self, user: User) -> Result<User> {
        self.insert(USERS, &user).await?;
        info!("Created user with id {}", user.id);
        Ok(user)
    }

    async fn update_user(&self, id: ObjectId, fields: UserFields) -> Result<Option<User>> {
        self.merge(USERS, id, fields.to_set_document()?).await
    }

    async fn delete_user(&self, id: ObjectId) -> Result<bool> {
        self.remove(USERS, id).await
    }

    async fn list_taxonomy(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyEntry>> {
        self.find_all(kind.collection(), doc! {}).await
    }
}
