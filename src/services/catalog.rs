//! Catalog management service

use chrono::{Datelike, Utc};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books_search(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    /// Create a new book with catalog code deduplication
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        if book.year > Utc::now().year() {
            return Err(AppError::Validation(
                "Year cannot be in the future".to_string(),
            ));
        }

        if self.repository.books_code_exists(&book.code).await? {
            return Err(AppError::Conflict(format!(
                "A book with code {} already exists",
                book.code
            )));
        }

        let created = self.repository.books_create(&book).await?;

        tracing::info!("Created book id={} code={}", created.id, created.code);

        Ok(created)
    }
}
