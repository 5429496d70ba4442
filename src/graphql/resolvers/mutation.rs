use super::{object_id, respond};
use crate::domain;
use crate::error::{ApiError, Result};
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{Band, BandInput, User, UserInput};
use async_graphql::{Context, FieldResult, Object, ID};
use tracing::info;

/// Root mutation object for GraphQL
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a band and return it with its new ID
    async fn new_band(&self, ctx: &Context<'_>, input: Option<BandInput>) -> FieldResult<Option<Band>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = create_band(context, input.unwrap_or_default()).await;
        respond("newBand", result.map(|band| Some(band.into())))
    }

    /// Merge the given fields into an existing band
    async fn update_band(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: Option<BandInput>,
    ) -> FieldResult<Option<Band>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = merge_band(context, &id, input.unwrap_or_default()).await;
        respond("updateBand", result.map(|band| Some(band.into())))
    }

    /// Delete a band by ID
    async fn delete_band(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<String>> {
        let context = ctx.data::<GraphQLContext>()?;
        respond("deleteBand", remove_band(context, &id).await.map(Some))
    }

    /// Create a user and return it with its new ID
    async fn new_user(&self, ctx: &Context<'_>, input: Option<UserInput>) -> FieldResult<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = create_user(context, input.unwrap_or_default()).await;
        respond("newUser", result.map(|user| Some(user.into())))
    }

    /// Merge the given fields into an existing user
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: Option<UserInput>,
    ) -> FieldResult<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let result = merge_user(context, &id, input.unwrap_or_default()).await;
        respond("updateUser", result.map(|user| Some(user.into())))
    }

    /// Delete a user by ID
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<String>> {
        let context = ctx.data::<GraphQLContext>()?;
        respond("deleteUser", remove_user(context, &id).await.map(Some))
    }
}

async fn create_band(context: &GraphQLContext, input: BandInput) -> Result<domain::Band> {
    let band = domain::Band::create(input.into_fields()?);
    context.storage.insert_band(band).await
}

async fn merge_band(context: &GraphQLContext, id: &ID, input: BandInput) -> Result<domain::Band> {
    let band_id = object_id("Band", id)?;
    let fields = input.into_fields()?;
    context
        .storage
        .update_band(band_id, fields)
        .await?
        .ok_or_else(|| ApiError::not_found("Band", id.as_str()))
}

async fn remove_band(context: &GraphQLContext, id: &ID) -> Result<String> {
    let band_id = object_id("Band", id)?;
    if !context.storage.delete_band(band_id).await? {
        return Err(ApiError::not_found("Band", id.as_str()));
    }
    info!("Deleted band with id {}", band_id);
    Ok("Band removed".to_string())
}

async fn create_user(context: &GraphQLContext, input: UserInput) -> Result<domain::User> {
    let user = domain::User::create(input.into_fields()?);
    context.storage.insert_user(user).await
}

async fn merge_user(context: &GraphQLContext, id: &ID, input: UserInput) -> Result<domain::User> {
    let user_id = object_id("User", id)?;
    let fields = input.into_fields()?;
    context
        .storage
        .update_user(user_id, fields)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id.as_str()))
}

async fn remove_user(context: &GraphQLContext, id: &ID) -> Result<String> {
    let user_id = object_id("User", id)?;
    if !context.storage.delete_user(user_id).await? {
        return Err(ApiError::not_found("User", id.as_str()));
    }
    info!("Deleted user with id {}", user_id);
    Ok("User removed".to_string())
}
