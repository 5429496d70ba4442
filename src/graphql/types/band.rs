use super::common::{convert_all, Genre, Image, Role, Video};
use super::user::User;
use crate::domain::{self, format_date};
use async_graphql::{Object, ID};

/// GraphQL representation of a Band
#[derive(Clone)]
pub struct Band {
    pub inner: domain::Band,
}

impl From<domain::Band> for Band {
    fn from(band: domain::Band) -> Self {
        Self { inner: band }
    }
}

#[Object(rename_fields = "snake_case")]
impl Band {
    /// The unique identifier for the band
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    async fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Where the band is based
    async fn location(&self) -> Option<&str> {
        self.inner.location.as_deref()
    }

    async fn email(&self) -> Option<&str> {
        self.inner.email.as_deref()
    }

    /// When the band was founded, as an RFC 3339 timestamp
    async fn foundation_date(&self) -> Option<String> {
        self.inner.foundation_date.as_ref().and_then(format_date)
    }

    async fn genres(&self) -> Vec<Genre> {
        convert_all(self.inner.genres.clone())
    }

    /// Roles the band is looking to fill
    async fn searching(&self) -> Vec<Role> {
        convert_all(self.inner.searching.clone())
    }

    async fn videos(&self) -> Vec<Video> {
        convert_all(self.inner.videos.clone())
    }

    async fn images(&self) -> Vec<Image> {
        convert_all(self.inner.images.clone())
    }

    async fn avatar(&self) -> Option<Image> {
        self.inner.avatar.clone().map(Image::from)
    }

    /// Members embedded in the band document
    async fn members(&self) -> Vec<User> {
        convert_all(self.inner.members.clone())
    }

    #[graphql(name = "createdAt")]
    async fn created_at(&self) -> Option<String> {
        self.inner.created_at.as_ref().and_then(format_date)
    }

    #[graphql(name = "updatedAt")]
    async fn updated_at(&self) -> Option<String> {
        self.inner.updated_at.as_ref().and_then(format_date)
    }
}
