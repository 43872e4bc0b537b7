//! Controllers translate transport values (string IDs, optional page sizes)
//! into usecase calls.

use trellis_id::UserId;

use crate::model::{CreateUserInput, UpdateUserInput, User, UserFilter};
use crate::usecase::{UserError, UserUsecase};

/// Page size when `first` is omitted.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Every controller the GraphQL layer can reach.
pub struct Controller {
    pub user: UserController,
}

pub struct UserController {
    usecase: UserUsecase,
}

impl UserController {
    pub fn new(usecase: UserUsecase) -> Self {
        Self { usecase }
    }

    pub async fn get(&self, id: &str) -> Result<User, UserError> {
        self.usecase.get(UserId::parse(id)?).await
    }

    /// Like [`Self::get`], but a missing user is `Ok(None)`.
    pub async fn find(&self, id: &str) -> Result<Option<User>, UserError> {
        self.usecase.find(UserId::parse(id)?).await
    }

    pub async fn list(
        &self,
        first: Option<i32>,
        filter: Option<UserFilter>,
    ) -> Result<Vec<User>, UserError> {
        let filter = filter.unwrap_or_default();
        self.usecase.list(&filter, page_size(first)).await
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<User, UserError> {
        self.usecase.create(input).await
    }

    pub async fn update(&self, id: &str, input: UpdateUserInput) -> Result<User, UserError> {
        self.usecase.update(UserId::parse(id)?, input).await
    }
}

/// Resolves a requested page size into `[0, MAX_PAGE_SIZE]`.
pub fn page_size(first: Option<i32>) -> i64 {
    first
        .map(i64::from)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(0, MAX_PAGE_SIZE)
}
