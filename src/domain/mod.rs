//! Documents stored in the `bands`, `users`, `genres`, `instruments` and
//! `roles` collections.
//!
//! Every field is optional: documents are written exactly as clients send
//! them. `*Fields` structs are partial documents used both to create a new
//! document and to merge into an existing one.

use crate::error::{ApiError, Result};
use chrono::NaiveDate;
use mongodb::bson::{self, oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

/// Reference to a taxonomy entry (genre, role or instrument), matched by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub instruments: Vec<NamedRef>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<NamedRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<NamedRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
}

impl User {
    /// Build a new document with a freshly generated id and timestamps.
    pub fn create(fields: UserFields) -> Self {
        let now = DateTime::now();
        let mut user = Self {
            id: ObjectId::new(),
            name: None,
            nickname: None,
            description: None,
            email: None,
            birth_date: None,
            address: None,
            instruments: Vec::new(),
            genres: Vec::new(),
            avatar: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        fields.apply_to(&mut user);
        user
    }
}

impl UserFields {
    /// Merge the provided fields into `user`; absent fields keep their value.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(nickname) = self.nickname {
            user.nickname = Some(nickname);
        }
        if let Some(description) = self.description {
            user.description = Some(description);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = Some(birth_date);
        }
        if let Some(address) = self.address {
            user.address = Some(address);
        }
        if let Some(instruments) = self.instruments {
            user.instruments = instruments;
        }
        if let Some(genres) = self.genres {
            user.genres = genres;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        user.updated_at = Some(DateTime::now());
    }

    /// `$set` document for a partial update.
    pub fn to_set_document(&self) -> Result<Document> {
        set_document(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundation_date: Option<DateTime>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    /// Roles the band is looking to fill.
    #[serde(default)]
    pub searching: Vec<NamedRef>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundation_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<NamedRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searching: Option<Vec<NamedRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
    /// Replaces the embedded member list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<User>>,
}

impl Band {
    pub fn create(fields: BandFields) -> Self {
        let now = DateTime::now();
        let mut band = Self {
            id: ObjectId::new(),
            name: None,
            description: None,
            location: None,
            email: None,
            foundation_date: None,
            genres: Vec::new(),
            searching: Vec::new(),
            videos: Vec::new(),
            images: Vec::new(),
            avatar: None,
            members: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        fields.apply_to(&mut band);
        band
    }
}

impl BandFields {
    pub fn apply_to(self, band: &mut Band) {
        if let Some(name) = self.name {
            band.name = Some(name);
        }
        if let Some(description) = self.description {
            band.description = Some(description);
        }
        if let Some(location) = self.location {
            band.location = Some(location);
        }
        if let Some(email) = self.email {
            band.email = Some(email);
        }
        if let Some(foundation_date) = self.foundation_date {
            band.foundation_date = Some(foundation_date);
        }
        if let Some(genres) = self.genres {
            band.genres = genres;
        }
        if let Some(searching) = self.searching {
            band.searching = searching;
        }
        if let Some(videos) = self.videos {
            band.videos = videos;
        }
        if let Some(images) = self.images {
            band.images = images;
        }
        if let Some(avatar) = self.avatar {
            band.avatar = Some(avatar);
        }
        if let Some(members) = self.members {
            band.members = members;
        }
        band.updated_at = Some(DateTime::now());
    }

    pub fn to_set_document(&self) -> Result<Document> {
        set_document(self)
    }
}

fn set_document<T: Serialize>(fields: &T) -> Result<Document> {
    let mut set = bson::to_document(fields)?;
    set.insert("updatedAt", DateTime::now());
    Ok(set)
}

/// Which lookup collection `getList` reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Genres,
    Instruments,
    Roles,
}

impl TaxonomyKind {
    /// Accepts the collection name or its singular form; anything else is `None`.
    pub fn parse(what: &str) -> Option<Self> {
        match what.trim() {
            "genres" | "genre" => Some(TaxonomyKind::Genres),
            "instruments" | "instrument" => Some(TaxonomyKind::Instruments),
            "roles" | "role" => Some(TaxonomyKind::Roles),
            _ => None,
        }
    }

    pub fn collection(self) -> &'static str {
        match self {
            TaxonomyKind::Genres => "genres",
            TaxonomyKind::Instruments => "instruments",
            TaxonomyKind::Roles => "roles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
}

impl TaxonomyEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: Some(name.into()),
        }
    }
}

/// Parse a client-supplied date (`YYYY-MM-DD` or RFC 3339) into a BSON date.
pub fn parse_date(value: &str) -> Result<DateTime> {
    let value = value.trim();
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ApiError::InvalidDate(value.to_string()))?;
        return Ok(DateTime::from_millis(midnight.and_utc().timestamp_millis()));
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| DateTime::from_millis(dt.timestamp_millis()))
        .map_err(|_| ApiError::InvalidDate(value.to_string()))
}

pub fn format_date(value: &DateTime) -> Option<String> {
    value.try_to_rfc3339_string().ok()
}

/// Strip surrounding whitespace, as the document schema does for names and
/// descriptions.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Parse a GraphQL `ID` into a document id. Malformed ids resolve to nothing.
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
