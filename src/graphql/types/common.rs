use crate::domain::{self, NamedRef, TaxonomyEntry};
use async_graphql::{SimpleObject, ID};

/// A genre referenced by name
#[derive(SimpleObject, Clone)]
pub struct Genre {
    pub name: Option<String>,
}

impl From<NamedRef> for Genre {
    fn from(r: NamedRef) -> Self {
        Self { name: r.name }
    }
}

/// A role a band is searching for, referenced by name
#[derive(SimpleObject, Clone)]
pub struct Role {
    pub name: Option<String>,
}

impl From<NamedRef> for Role {
    fn from(r: NamedRef) -> Self {
        Self { name: r.name }
    }
}

/// An instrument a musician plays, referenced by name
#[derive(SimpleObject, Clone)]
pub struct Instrument {
    pub name: Option<String>,
}

impl From<NamedRef> for Instrument {
    fn from(r: NamedRef) -> Self {
        Self { name: r.name }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Video {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl From<domain::Video> for Video {
    fn from(v: domain::Video) -> Self {
        Self {
            title: v.title,
            url: v.url,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Image {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl From<domain::Image> for Image {
    fn from(i: domain::Image) -> Self {
        Self {
            name: i.name,
            url: i.url,
        }
    }
}

/// An entry of the genre, instrument or role lookup lists
#[derive(SimpleObject, Clone)]
pub struct ListItem {
    pub id: ID,
    pub name: Option<String>,
}

impl From<TaxonomyEntry> for ListItem {
    fn from(entry: TaxonomyEntry) -> Self {
        Self {
            id: ID(entry.id.to_hex()),
            name: entry.name,
        }
    }
}

pub(crate) fn convert_all<S, T: From<S>>(items: Vec<S>) -> Vec<T> {
    items.into_iter().map(T::from).collect()
}
