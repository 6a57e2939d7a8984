//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books with filters and pagination
    pub async fn list(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let mut conditions: Vec<String> = Vec::new();

        let search_like = query.search.as_ref().map(|s| format!("%{}%", s));
        let author_like = query.author.as_ref().map(|s| format!("%{}%", s));

        if search_like.is_some() {
            conditions.push(format!(
                "(title ILIKE ${n} OR author ILIKE ${n} OR category ILIKE ${n})",
                n = conditions.len() + 1
            ));
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", conditions.len() + 1));
        }
        if author_like.is_some() {
            conditions.push(format!("author ILIKE ${}", conditions.len() + 1));
        }
        if query.min_price.is_some() {
            conditions.push(format!("price >= ${}", conditions.len() + 1));
        }
        if query.max_price.is_some() {
            conditions.push(format!("price <= ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            "TRUE".to_string()
        } else {
            conditions.join(" AND ")
        };

        let count_sql = format!("SELECT COUNT(*) FROM books WHERE {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(ref s) = search_like {
            count_query = count_query.bind(s);
        }
        if let Some(ref c) = query.category {
            count_query = count_query.bind(c);
        }
        if let Some(ref a) = author_like {
            count_query = count_query.bind(a);
        }
        if let Some(min) = query.min_price {
            count_query = count_query.bind(min);
        }
        if let Some(max) = query.max_price {
            count_query = count_query.bind(max);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let select_sql = format!(
            "SELECT * FROM books WHERE {} ORDER BY id LIMIT {} OFFSET {}",
            where_clause,
            query.size(),
            query.offset()
        );
        let mut select_query = sqlx::query_as::<_, Book>(&select_sql);
        if let Some(ref s) = search_like {
            select_query = select_query.bind(s);
        }
        if let Some(ref c) = query.category {
            select_query = select_query.bind(c);
        }
        if let Some(ref a) = author_like {
            select_query = select_query.bind(a);
        }
        if let Some(min) = query.min_price {
            select_query = select_query.bind(min);
        }
        if let Some(max) = query.max_price {
            select_query = select_query.bind(max);
        }
        let books = select_query.fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Get book by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    /// Check if a book exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if ISBN already exists
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND id != $2)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a book
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, category, price, isbn)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a book (absent fields keep their value)
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();

        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                author = COALESCE($2, author),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                isbn = COALESCE($5, isbn),
                updated_at = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.isbn)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book.
    ///
    /// Library counts for Active mappings of this book are decremented in the
    /// same transaction; the mapping rows themselves cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE libraries SET
                count = GREATEST(count - 1, 0),
                updated_at = $2
            WHERE id IN (
                SELECT lib_id FROM library_books
                WHERE book_id = $1 AND status = 'Active'
            )
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Distinct non-null categories
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM books WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Distinct authors
    pub async fn authors(&self) -> AppResult<Vec<String>> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT author FROM books ORDER BY author")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}
