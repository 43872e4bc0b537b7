//! GraphQL endpoint and playground.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::state::AppState;

/// Path that serves GraphQL (POST) and the playground (GET).
pub const QUERY_PATH: &str = "/query";

/// Create GraphQL routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(QUERY_PATH, get(playground).post(graphql_handler))
        .route("/", get(playground))
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema().execute(req.into_inner()).await.into()
}

async fn playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(QUERY_PATH).finish())
}
