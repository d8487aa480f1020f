//! Business logic services

pub mod borrows;
pub mod catalog;
pub mod users;

use crate::{auth::TokenCodec, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, codec: TokenCodec) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), codec),
            catalog: catalog::CatalogService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository),
        }
    }
}
