use super::{object_id, respond};
use crate::domain::TaxonomyKind;
use crate::error::{ApiError, Result};
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::common::convert_all as convert;
use crate::graphql::types::{Band, ListItem, User};
use crate::search::Search;
use async_graphql::{Context, FieldResult, Object, ID};

/// Root query object for GraphQL
pub struct Query;

#[Object]
impl Query {
    /// Get every band
    async fn get_bands(&self, ctx: &Context<'_>) -> FieldResult<Option<Vec<Band>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = context.storage.list_bands().await;
        respond("getBands", result.map(|items| Some(convert(items))))
    }

    /// Get a band by ID
    async fn get_band(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Band>> {
        let context = ctx.data::<GraphQLContext>()?;
        respond("getBand", find_band(context, &id).await.map(|band| Some(band.into())))
    }

    /// Search bands. `type` is one of `content` (pattern over name and
    /// description), `genre` or `searching` (comma-separated names).
    async fn get_bands_from_search(
        &self,
        ctx: &Context<'_>,
        text: Option<String>,
        #[graphql(name = "type")] kind: Option<String>,
    ) -> FieldResult<Option<Vec<Band>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = search_bands(context, text, kind).await;
        respond("getBandsFromSearch", result.map(|items| Some(convert(items))))
    }

    /// Get every user
    async fn get_users(&self, ctx: &Context<'_>) -> FieldResult<Option<Vec<User>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = context.storage.list_users().await;
        respond("getUsers", result.map(|items| Some(convert(items))))
    }

    /// Get a user by ID
    async fn get_user(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        respond("getUser", find_user(context, &id).await.map(|user| Some(user.into())))
    }

    /// Search users. `type` is one of `content` (pattern over name,
    /// description and nickname), `genre` or `instruments`.
    async fn get_users_from_search(
        &self,
        ctx: &Context<'_>,
        text: Option<String>,
        #[graphql(name = "type")] kind: Option<String>,
    ) -> FieldResult<Option<Vec<User>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = search_users(context, text, kind).await;
        respond("getUsersFromSearch", result.map(|items| Some(convert(items))))
    }

    /// Get a lookup list: `genres`, `instruments` or `roles`
    async fn get_list(&self, ctx: &Context<'_>, what: Option<String>) -> FieldResult<Option<Vec<ListItem>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = match what.as_deref().and_then(TaxonomyKind::parse) {
            Some(kind) => context.storage.list_taxonomy(kind).await,
            None => Ok(Vec::new()),
        };
        respond("getList", result.map(|items| Some(convert(items))))
    }
}

async fn find_band(context: &GraphQLContext, id: &ID) -> Result<crate::domain::Band> {
    let band_id = object_id("Band", id)?;
    context
        .storage
        .get_band(band_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Band", id.as_str()))
}

async fn find_user(context: &GraphQLContext, id: &ID) -> Result<crate::domain::User> {
    let user_id = object_id("User", id)?;
    context
        .storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id.as_str()))
}

async fn search_bands(
    context: &GraphQLContext,
    text: Option<String>,
    kind: Option<String>,
) -> Result<Vec<crate::domain::Band>> {
    let (Some(text), Some(kind)) = (text, kind) else {
        return Ok(Vec::new());
    };
    match Search::for_bands(&text, &kind)? {
        Some(search) => context.storage.search_bands(&search).await,
        None => Ok(Vec::new()),
    }
}

async fn search_users(
    context: &GraphQLContext,
    text: Option<String>,
    kind: Option<String>,
) -> Result<Vec<crate::domain::User>> {
    let (Some(text), Some(kind)) = (text, kind) else {
        return Ok(Vec::new());
    };
    match Search::for_users(&text, &kind)? {
        Some(search) => context.storage.search_users(&search).await,
        None => Ok(Vec::new()),
    }
}
