//! Shared handler state.

use std::sync::Arc;

use crate::db::Database;
use crate::graphql::AppSchema;

/// Cheap-to-clone handle given to every axum handler.
///
/// The schema already owns the controllers; the database handle is kept
/// separately for readiness probes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    schema: AppSchema,
}

impl AppState {
    pub fn new(db: Database, schema: AppSchema) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, schema }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn schema(&self) -> &AppSchema {
        &self.inner.schema
    }
}
