//! Borrow domain methods on Repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        book::BookShort,
        borrow::{Borrow, BorrowDetails, BorrowStatus},
    },
};

/// Internal row structure for borrow + book joins
#[derive(Debug, FromRow)]
struct BorrowDetailsRow {
    id: i32,
    book_id: i32,
    title: String,
    author: String,
    code: String,
    borrow_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    returned_date: Option<DateTime<Utc>>,
    fine: Decimal,
    status: BorrowStatus,
}

impl BorrowDetailsRow {
    fn into_details(self, now: DateTime<Utc>) -> BorrowDetails {
        let status = match self.status {
            BorrowStatus::Borrowed if self.returned_date.is_none() && self.due_date < now => {
                BorrowStatus::Overdue
            }
            status => status,
        };

        BorrowDetails {
            id: self.id,
            book: BookShort {
                id: self.book_id,
                title: self.title,
                author: self.author,
                code: self.code,
            },
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            returned_date: self.returned_date,
            fine: self.fine,
            status,
        }
    }
}

impl Repository {
    /// Create a borrow record
    pub async fn borrows_create(
        &self,
        user_id: i32,
        book_id: i32,
        due_date: DateTime<Utc>,
    ) -> AppResult<Borrow> {
        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (user_id, book_id, due_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(borrow)
    }

    /// List borrow records for a user, newest first, with book details
    pub async fn borrows_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowDetails>> {
        let rows = sqlx::query_as::<_, BorrowDetailsRow>(
            r#"
            SELECT br.id, br.book_id, b.title, b.author, b.code,
                   br.borrow_date, br.due_date, br.returned_date, br.fine, br.status
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            WHERE br.user_id = $1
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_details(now)).collect())
    }
}
