//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
};

impl Repository {
    /// Search books with optional title/author filter and pagination
    pub async fn books_search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * per_page;
        let search = query.search.as_deref().unwrap_or("");

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ($1 = '' OR title ILIKE '%' || $1 || '%' OR author ILIKE '%' || $1 || '%')
            ORDER BY title
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM books
            WHERE ($1 = '' OR title ILIKE '%' || $1 || '%' OR author ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Check if a catalog code already exists
    pub async fn books_code_exists(&self, code: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Create a new book
    pub async fn books_create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, year, code)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .bind(&book.code)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
