use super::common::{convert_all, Genre, Image, Instrument};
use crate::domain::{self, format_date};
use async_graphql::{Object, ID};

/// GraphQL representation of a User (a musician, standalone or band member)
#[derive(Clone)]
pub struct User {
    pub inner: domain::User,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self { inner: user }
    }
}

#[Object(rename_fields = "snake_case")]
impl User {
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    async fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    async fn nickname(&self) -> Option<&str> {
        self.inner.nickname.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    async fn email(&self) -> Option<&str> {
        self.inner.email.as_deref()
    }

    /// Date of birth, as an RFC 3339 timestamp
    async fn birth_date(&self) -> Option<String> {
        self.inner.birth_date.as_ref().and_then(format_date)
    }

    async fn address(&self) -> Option<&str> {
        self.inner.address.as_deref()
    }

    async fn instruments(&self) -> Vec<Instrument> {
        convert_all(self.inner.instruments.clone())
    }

    async fn genres(&self) -> Vec<Genre> {
        convert_all(self.inner.genres.clone())
    }

    async fn avatar(&self) -> Option<Image> {
        self.inner.avatar.clone().map(Image::from)
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
