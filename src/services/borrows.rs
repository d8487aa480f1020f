//! Borrow record management service

use chrono::{Duration, Utc};

use crate::{
    error::AppResult,
    models::borrow::{Borrow, BorrowDetails, CreateBorrow},
    repository::Repository,
};

/// Default loan duration when the caller does not provide a due date
const DEFAULT_LOAN_DAYS: i64 = 7;

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a borrow record for a (user, book) pair. Both must exist;
    /// the due date defaults to seven days from now.
    pub async fn create_borrow(&self, request: &CreateBorrow) -> AppResult<Borrow> {
        // Explicit existence checks so a missing user or book is a 404,
        // not an opaque foreign key failure
        self.repository.users_get_by_id(request.user_id).await?;
        self.repository.books_get_by_id(request.book_id).await?;

        let due_date = request
            .due_date
            .unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_LOAN_DAYS));

        let borrow = self
            .repository
            .borrows_create(request.user_id, request.book_id, due_date)
            .await?;

        tracing::info!(
            "Created borrow id={} user={} book={}",
            borrow.id,
            borrow.user_id,
            borrow.book_id
        );

        Ok(borrow)
    }

    /// List borrow records for a user with book details
    pub async fn user_borrows(&self, user_id: i32) -> AppResult<Vec<BorrowDetails>> {
        self.repository.borrows_for_user(user_id).await
    }
}
