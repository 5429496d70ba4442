use super::Storage;
use crate::domain::{Band, BandFields, TaxonomyEntry, TaxonomyKind, User, UserFields};
use crate::error::Result;
use crate::search::Search;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory storage implementation for development/testing.
///
/// Collections keep insertion order, like a collection scan without a sort.
#[derive(Default)]
pub struct InMemoryStorage {
    bands: RwLock<Vec<Band>>,
    users: RwLock<Vec<User>>,
    genres: RwLock<Vec<TaxonomyEntry>>,
    instruments: RwLock<Vec<TaxonomyEntry>>,
    roles: RwLock<Vec<TaxonomyEntry>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a lookup list.
    pub async fn add_taxonomy(&self, kind: TaxonomyKind, names: &[&str]) {
        let mut entries = self.taxonomy(kind).write().await;
        entries.extend(names.iter().map(|name| TaxonomyEntry::new(*name)));
    }

    fn taxonomy(&self, kind: TaxonomyKind) -> &RwLock<Vec<TaxonomyEntry>> {
        match kind {
            TaxonomyKind::Genres => &self.genres,
            TaxonomyKind::Instruments => &self.instruments,
            TaxonomyKind::Roles => &self.roles,
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_bands(&self) -> Result<Vec<Band>> {
        Ok(self.bands.read().await.clone())
    }

    async fn get_band(&self, id: ObjectId) -> Result<Option<Band>> {
        let bands = self.bands.read().await;
        Ok(bands.iter().find(|b| b.id == id).cloned())
    }

    async fn search_bands(&self, search: &Search) -> Result<Vec<Band>> {
        let bands = self.bands.read().await;
        Ok(bands.iter().filter(|b| search.matches(*b)).cloned().collect())
    }

    async fn insert_band(&self, band: Band) -> Result<Band> {
        debug!("Created band {} with id {}", band.name.as_deref().unwrap_or(""), band.id);
        self.bands.write().await.push(band.clone());
        Ok(band)
    }

    async fn update_band(&self, id: ObjectId, fields: BandFields) -> Result<Option<Band>> {
        let mut bands = self.bands.write().await;
        Ok(bands.iter_mut().find(|b| b.id == id).map(|band| {
            fields.apply_to(band);
            debug!("Updated band with id {}", id);
            band.clone()
        }))
    }

    async fn delete_band(&self, id: ObjectId) -> Result<bool> {
        let mut bands = self.bands.write().await;
        let before = bands.len();
        bands.retain(|b| b.id != id);
        Ok(bands.len() != before)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, id: ObjectId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn search_users(&self, search: &Search) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| search.matches(*u)).cloned().collect())
    }

    async fn insert_user(&self, user: User) -> Result<User> {
        debug!("Created user {} with id {}", user.name.as_deref().unwrap_or(""), user.id);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: ObjectId, fields: UserFields) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            fields.apply_to(user);
            debug!("Updated user with id {}", id);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: ObjectId) -> Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn list_taxonomy(&self, kind: TaxonomyKind) -> Result<Vec<TaxonomyEntry>> {
        Ok(self.taxonomy(kind).read().await.clone())
    }
}
