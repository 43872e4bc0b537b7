//! GraphQL error mapping.
//!
//! Errors keep the usecase message and add an `extensions.code`.

use async_graphql::{Error, ErrorExtensions};
use trellis_id::ClassifyError;

use crate::usecase::UserError;

impl ErrorExtensions for UserError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Maps a classification failure for a client-supplied node ID.
pub fn classify_error(err: &ClassifyError) -> Error {
    let code = match err {
        ClassifyError::Malformed { .. } => "MALFORMED_ID",
        ClassifyError::UnknownPrefix { .. } => "UNKNOWN_PREFIX",
    };
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}
