//! `User` object plus its queries and mutations.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use chrono::{DateTime, Utc};

use crate::controller::Controller;
use crate::model::{CreateUserInput, UpdateUserInput, User, UserFilter};

#[Object]
impl User {
    /// Global ID; the `usr_` prefix marks it as a user.
    pub async fn id(&self) -> ID {
        ID(self.id.to_string())
    }

    async fn first_name(&self) -> &str {
        &self.first_name
    }

    async fn last_name(&self) -> &str {
        &self.last_name
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Fetch a single user.
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<User> {
        let controller = ctx.data::<Arc<Controller>>()?;
        controller.user.get(&id).await.map_err(|e| e.extend())
    }

    /// List users, oldest first.
    async fn users(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        #[graphql(name = "where")] filter: Option<UserFilter>,
    ) -> Result<Vec<User>> {
        let controller = ctx.data::<Arc<Controller>>()?;
        controller
            .user
            .list(first, filter)
            .await
            .map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, input: CreateUserInput) -> Result<User> {
        let controller = ctx.data::<Arc<Controller>>()?;
        controller.user.create(input).await.map_err(|e| e.extend())
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateUserInput,
    ) -> Result<User> {
        let controller = ctx.data::<Arc<Controller>>()?;
        controller
            .user
            .update(&id, input)
            .await
            .map_err(|e| e.extend())
    }
}
