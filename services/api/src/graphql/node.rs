//! Relay `Node` interface.
//!
//! Node IDs are the entity IDs themselves. The type prefix picks the
//! per-type fetch, so no lookup table or encoded wrapper is needed.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Interface, Object, Result, ID};
use tracing::debug;
use trellis_id::{EntityType, PrefixRegistry};

use super::error::classify_error;
use crate::controller::Controller;
use crate::model::User;
use crate::usecase::UserError;

#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID"))]
pub enum Node {
    User(User),
}

#[derive(Default)]
pub struct NodeQuery;

#[Object]
impl NodeQuery {
    /// Fetch any object by its global ID.
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Node>> {
        let registry = ctx.data::<Arc<PrefixRegistry>>()?;
        let controller = ctx.data::<Arc<Controller>>()?;
        let entity = registry.classify(&id).map_err(|e| classify_error(&e))?;
        fetch(controller, entity, &id).await.map_err(|e| e.extend())
    }

    /// Fetch several objects. IDs that cannot be classified or parsed, and
    /// objects that do not exist, resolve to null.
    async fn nodes(&self, ctx: &Context<'_>, ids: Vec<ID>) -> Result<Vec<Option<Node>>> {
        let registry = ctx.data::<Arc<PrefixRegistry>>()?;
        let controller = ctx.data::<Arc<Controller>>()?;
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let entity = match registry.classify(&id) {
                Ok(entity) => entity,
                Err(e) => {
                    debug!(error = %e, "Skipping unclassifiable node id");
                    results.push(None);
                    continue;
                }
            };
            match fetch(controller, entity, &id).await {
                Ok(node) => results.push(node),
                Err(UserError::InvalidId(e)) => {
                    debug!(error = %e, entity = entity.type_name(), "Skipping malformed node id");
                    results.push(None);
                }
                Err(e) => return Err(e.extend()),
            }
        }
        Ok(results)
    }
}

async fn fetch(
    controller: &Controller,
    entity: EntityType,
    id: &str,
) -> std::result::Result<Option<Node>, UserError> {
    match entity {
        EntityType::User => Ok(controller.user.find(id).await?.map(Node::User)),
    }
}
