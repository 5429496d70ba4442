//! Search modes behind `getBandsFromSearch` / `getUsersFromSearch`.
//!
//! A [`Search`] is evaluated two ways: as a MongoDB filter for the real
//! store and as an in-process predicate for [`InMemoryStorage`]. Both must
//! select the same documents.
//!
//! Patterns are validated with the `regex` crate before either backend sees
//! them, so syntax `regex` rejects (lookaround, backreferences) is refused
//! everywhere. MongoDB's PCRE2 treats `\w`, `\d` and `\b` as ASCII-only unless
//! the pattern starts with `(*UCP)`, which the store filter always adds.
//!
//! [`InMemoryStorage`]: crate::storage::InMemoryStorage

use crate::domain::{Band, NamedRef, User};
use crate::error::{ApiError, Result};
use mongodb::bson::{doc, Document};
use regex::Regex;

#[derive(Debug, Clone)]
pub enum Search {
    /// Case-sensitive pattern matched against any of the text fields.
    Pattern {
        fields: &'static [&'static str],
        regex: Regex,
    },
    /// Any entry of the named list whose `name` equals one of `names`.
    Names {
        list: &'static str,
        names: Vec<String>,
    },
}

const BAND_TEXT_FIELDS: &[&str] = &["name", "description"];
const USER_TEXT_FIELDS: &[&str] = &["name", "description", "nickname"];

/// PCRE2 verb making character classes Unicode-aware, as they are in `regex`.
const UNICODE_CLASSES: &str = "(*UCP)";

impl Search {
    /// Band modes: `content`, `genre`, `searching`. `Ok(None)` for anything else.
    pub fn for_bands(text: &str, kind: &str) -> Result<Option<Self>> {
        match kind {
            "content" => Self::pattern(BAND_TEXT_FIELDS, text).map(Some),
            "genre" => Ok(Some(Self::names("genres", text))),
            "searching" => Ok(Some(Self::names("searching", text))),
            _ => Ok(None),
        }
    }

    /// User modes: `content`, `genre`, `instruments`. `Ok(None)` for anything else.
    pub fn for_users(text: &str, kind: &str) -> Result<Option<Self>> {
        match kind {
            "content" => Self::pattern(USER_TEXT_FIELDS, text).map(Some),
            "genre" => Ok(Some(Self::names("genres", text))),
            "instruments" => Ok(Some(Self::names("instruments", text))),
            _ => Ok(None),
        }
    }

    fn pattern(fields: &'static [&'static str], text: &str) -> Result<Self> {
        let regex = Regex::new(text).map_err(|e| ApiError::InvalidPattern {
            pattern: text.to_string(),
            message: e.to_string(),
        })?;
        Ok(Search::Pattern { fields, regex })
    }

    fn names(list: &'static str, text: &str) -> Self {
        let names = text
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Search::Names { list, names }
    }

    /// MongoDB query filter selecting the same documents as [`Search::matches`].
    pub fn to_filter(&self) -> Document {
        match self {
            Search::Pattern { fields, regex } => {
                let pattern = format!("{UNICODE_CLASSES}{}", regex.as_str());
                let clauses: Vec<Document> = fields
                    .iter()
                    .map(|field| {
                        let mut clause = Document::new();
                        clause.insert(*field, doc! { "$regex": pattern.as_str() });
                        clause
                    })
                    .collect();
                doc! { "$or": clauses }
            }
            Search::Names { list, names } => {
                let mut filter = Document::new();
                filter.insert(format!("{list}.name"), doc! { "$in": names.clone() });
                filter
            }
        }
    }

    pub fn matches<D: Searchable>(&self, document: &D) -> bool {
        match self {
            Search::Pattern { fields, regex } => fields
                .iter()
                .filter_map(|field| document.text_field(field))
                .any(|value| regex.is_match(value)),
            Search::Names { list, names } => document.name_list(list).iter().any(|entry| {
                entry
                    .name
                    .as_ref()
                    .is_some_and(|name| names.iter().any(|wanted| wanted == name))
            }),
        }
    }
}

/// Field access used by the in-process evaluation of a [`Search`].
pub trait Searchable {
    fn text_field(&self, field: &str) -> Option<&str>;
    fn name_list(&self, list: &str) -> &[NamedRef];
}

impl Searchable for Band {
    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }

    fn name_list(&self, list: &str) -> &[NamedRef] {
        match list {
            "genres" => &self.genres,
            "searching" => &self.searching,
            _ => &[],
        }
    }
}

impl Searchable for User {
    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            "nickname" => self.nickname.as_deref(),
            _ => None,
        }
    }

    fn name_list(&self, list: &str) -> &[NamedRef] {
        match list {
            "genres" => &self.genres,
            "instruments" => &self.instruments,
            _ => &[],
        }
    }
}
