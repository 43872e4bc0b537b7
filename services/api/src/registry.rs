//! Dependency wiring: repository → usecase → controller.

use std::sync::Arc;

use crate::controller::{Controller, UserController};
use crate::db::Database;
use crate::usecase::{UserRepository, UserUsecase};

pub struct Registry {
    users: Arc<dyn UserRepository>,
}

impl Registry {
    /// Wire controllers against Postgres.
    pub fn new(db: &Database) -> Self {
        Self::with_repository(Arc::new(db.users()))
    }

    /// Wire controllers against any user repository.
    pub fn with_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn new_controller(&self) -> Controller {
        Controller {
            user: self.new_user_controller(),
        }
    }

    pub fn new_user_controller(&self) -> UserController {
        let usecase = UserUsecase::new(self.users.clone());
        UserController::new(usecase)
    }
}
