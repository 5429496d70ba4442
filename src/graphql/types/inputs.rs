use crate::domain::{self, parse_date, trimmed, BandFields, NamedRef, UserFields};
use crate::error::Result;
use async_graphql::InputObject;

#[derive(InputObject, Default)]
pub struct GenreInput {
    pub name: Option<String>,
}

#[derive(InputObject, Default)]
pub struct RoleInput {
    pub name: Option<String>,
}

#[derive(InputObject, Default)]
pub struct InstrumentInput {
    pub name: Option<String>,
}

#[derive(InputObject, Default)]
pub struct VideoInput {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(InputObject, Default)]
pub struct ImageInput {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl From<GenreInput> for NamedRef {
    fn from(input: GenreInput) -> Self {
        NamedRef { name: input.name }
    }
}

impl From<RoleInput> for NamedRef {
    fn from(input: RoleInput) -> Self {
        NamedRef { name: input.name }
    }
}

impl From<InstrumentInput> for NamedRef {
    fn from(input: InstrumentInput) -> Self {
        NamedRef { name: input.name }
    }
}

impl From<VideoInput> for domain::Video {
    fn from(input: VideoInput) -> Self {
        domain::Video {
            title: input.title,
            url: input.url,
        }
    }
}

impl From<ImageInput> for domain::Image {
    fn from(input: ImageInput) -> Self {
        domain::Image {
            name: input.name,
            url: input.url,
        }
    }
}

fn convert_list<S, T: From<S>>(items: Option<Vec<S>>) -> Option<Vec<T>> {
    items.map(|items| items.into_iter().map(T::from).collect())
}

fn convert_date(value: Option<String>) -> Result<Option<mongodb::bson::DateTime>> {
    value.as_deref().map(parse_date).transpose()
}

/// Fields of a user, for `newUser`, `updateUser` and band members.
#[derive(InputObject, Default)]
#[graphql(rename_fields = "snake_case")]
pub struct UserInput {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub instruments: Option<Vec<InstrumentInput>>,
    pub genres: Option<Vec<GenreInput>>,
    pub avatar: Option<ImageInput>,
}

impl UserInput {
    pub fn into_fields(self) -> Result<UserFields> {
        Ok(UserFields {
            name: trimmed(self.name),
            nickname: self.nickname,
            description: trimmed(self.description),
            email: self.email,
            birth_date: convert_date(self.birth_date)?,
            address: self.address,
            instruments: convert_list(self.instruments),
            genres: convert_list(self.genres),
            avatar: self.avatar.map(Into::into),
        })
    }
}

/// Fields of a band, for `newBand` and `updateBand`.
#[derive(InputObject, Default)]
#[graphql(rename_fields = "snake_case")]
pub struct BandInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub foundation_date: Option<String>,
    pub email: Option<String>,
    pub genres: Option<Vec<GenreInput>>,
    pub searching: Option<Vec<RoleInput>>,
    pub videos: Option<Vec<VideoInput>>,
    pub images: Option<Vec<ImageInput>>,
    pub avatar: Option<ImageInput>,
    /// Replaces the member list; every member gets a new id.
    pub members: Option<Vec<UserInput>>,
}

impl BandInput {
    pub fn into_fields(self) -> Result<BandFields> {
        let members = match self.members {
            Some(members) => Some(
                members
                    .into_iter()
                    .map(|member| member.into_fields().map(domain::User::create))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(BandFields {
            name: trimmed(self.name),
            description: trimmed(self.description),
            location: self.location,
            email: self.email,
            foundation_date: convert_date(self.foundation_date)?,
            genres: convert_list(self.genres),
            searching: convert_list(self.searching),
            videos: convert_list(self.videos),
            images: convert_list(self.images),
            avatar: self.avatar.map(Into::into),
            members,
        })
    }
}
