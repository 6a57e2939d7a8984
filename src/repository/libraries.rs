//! Libraries repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::library::{CreateLibrary, Library, LibraryQuery, LibraryStats, UpdateLibrary},
    models::EntityStatus,
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List libraries with filters and pagination
    pub async fn list(&self, query: &LibraryQuery) -> AppResult<(Vec<Library>, i64)> {
        // Each condition consumes exactly one bind slot, so the placeholder
        // number is the position of the condition.
        let mut conditions: Vec<String> = Vec::new();

        let search_like = query.search.as_ref().map(|s| format!("%{}%", s));
        if search_like.is_some() {
            conditions.push(format!(
                "(name ILIKE ${n} OR dept ILIKE ${n})",
                n = conditions.len() + 1
            ));
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", conditions.len() + 1));
        }
        if query.dept.is_some() {
            conditions.push(format!("dept = ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            "TRUE".to_string()
        } else {
            conditions.join(" AND ")
        };

        let count_sql = format!("SELECT COUNT(*) FROM libraries WHERE {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(ref s) = search_like {
            count_query = count_query.bind(s);
        }
        if let Some(status) = query.status {
            count_query = count_query.bind(status);
        }
        if let Some(ref dept) = query.dept {
            count_query = count_query.bind(dept);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let select_sql = format!(
            "SELECT * FROM libraries WHERE {} ORDER BY id LIMIT {} OFFSET {}",
            where_clause,
            query.size(),
            query.offset()
        );
        let mut select_query = sqlx::query_as::<_, Library>(&select_sql);
        if let Some(ref s) = search_like {
            select_query = select_query.bind(s);
        }
        if let Some(status) = query.status {
            select_query = select_query.bind(status);
        }
        if let Some(ref dept) = query.dept {
            select_query = select_query.bind(dept);
        }
        let libraries = select_query.fetch_all(&self.pool).await?;

        Ok((libraries, total))
    }

    /// Get library by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Library> {
        sqlx::query_as::<_, Library>("SELECT * FROM libraries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Library {} not found", id)))
    }

    /// Check if a library exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM libraries WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a library
    pub async fn create(&self, data: &CreateLibrary) -> AppResult<Library> {
        let row = sqlx::query_as::<_, Library>(
            r#"
            INSERT INTO libraries (name, dept, count, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.dept)
        .bind(data.count.unwrap_or(0))
        .bind(data.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a library (absent fields keep their value)
    pub async fn update(&self, id: i32, data: &UpdateLibrary) -> AppResult<Library> {
        let now = Utc::now();

        sqlx::query_as::<_, Library>(
            r#"
            UPDATE libraries SET
                name = COALESCE($1, name),
                dept = COALESCE($2, dept),
                count = COALESCE($3, count),
                status = COALESCE($4, status),
                updated_at = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.dept)
        .bind(data.count)
        .bind(data.status)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library {} not found", id)))
    }

    /// Delete a library (mappings cascade at the DB level)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM libraries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Library {} not found", id)));
        }
        Ok(())
    }

    /// Recompute `count` from the set of Active mappings
    pub async fn recount(&self, id: i32) -> AppResult<Library> {
        sqlx::query_as::<_, Library>(
            r#"
            UPDATE libraries SET
                count = (
                    SELECT COUNT(*) FROM library_books
                    WHERE lib_id = $1 AND status = 'Active'
                ),
                updated_at = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Library {} not found", id)))
    }

    /// Aggregate counters over all libraries
    pub async fn stats(&self) -> AppResult<LibraryStats> {
        let (total, active): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = $1)
            FROM libraries
            "#,
        )
        .bind(EntityStatus::Active)
        .fetch_one(&self.pool)
        .await?;

        Ok(LibraryStats {
            total_libraries: total,
            active_libraries: active,
            inactive_libraries: total - active,
        })
    }
}
