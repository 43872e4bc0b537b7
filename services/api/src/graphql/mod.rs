//! GraphQL schema.
//!
//! Resolvers reach controllers and the prefix registry through schema data;
//! both are built once at startup and shared behind `Arc`.

mod error;
mod node;
mod user;

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use trellis_id::PrefixRegistry;

pub use node::{Node, NodeQuery};
pub use user::{UserMutation, UserQuery};

use crate::controller::Controller;

/// Combined Query type
#[derive(MergedObject, Default)]
pub struct Query(NodeQuery, UserQuery);

/// Combined Mutation type
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the executable schema.
pub fn build_schema(controller: Arc<Controller>, ids: Arc<PrefixRegistry>) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(controller)
        .data(ids)
        .finish()
}
