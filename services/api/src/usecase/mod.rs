//! Business rules, independent of transport and storage.

#[cfg(test)]
pub(crate) mod memory;
pub mod password;
mod user;

pub use user::{UserError, UserRepository, UserUsecase};
