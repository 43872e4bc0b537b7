//! trellis API server library.
//!
//! The crate ships a `trellis-api` binary; the library surface exists so
//! integration tests can build the router and stores directly.

pub mod api;
pub mod config;
pub mod controller;
pub mod db;
pub mod graphql;
pub mod model;
pub mod registry;
pub mod state;
pub mod usecase;
