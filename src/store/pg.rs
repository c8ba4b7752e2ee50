//! PostgreSQL-backed [`CatalogStore`].

use super::CatalogStore;
use crate::error::AppError;
use crate::model::{Item, NewItem, NewReview, Review, User};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(64) NOT NULL CHECK (char_length(title) >= 1),
        description VARCHAR(1024) NOT NULL CHECK (char_length(description) >= 1),
        price INTEGER NOT NULL CHECK (price BETWEEN 1 AND 1000000)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        text VARCHAR(1024) NOT NULL CHECK (char_length(text) >= 1),
        grade INTEGER NOT NULL CHECK (grade BETWEEN 1 AND 10),
        item_id BIGINT NOT NULL REFERENCES items(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_item_id_id_idx ON reviews (item_id, id DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(150) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_staff BOOLEAN NOT NULL DEFAULT FALSE,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
];

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create `items`, `reviews` and `users` if they do not exist. Idempotent.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        for ddl in TABLES_DDL {
            sqlx::query(*ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn create_item(&self, item: &NewItem) -> Result<i64, AppError> {
        tracing::debug!(title = %item.title, "insert item");
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO items (title, description, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, AppError> {
        let item = sqlx::query_as::<_, Item>("SELECT id, title, description, price FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn create_review(&self, item_id: i64, review: &NewReview) -> Result<Option<i64>, AppError> {
        tracing::debug!(item_id, grade = review.grade, "insert review");
        let mut tx = self.pool.begin().await?;
        // Row lock keeps the item from being deleted between the check and the insert.
        let exists = sqlx::query("SELECT 1 FROM items WHERE id = $1 FOR SHARE")
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            tx.rollback().await?;
            return Ok(None);
        }
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO reviews (text, grade, item_id) VALUES ($1, $2, $3) RETURNING id")
                .bind(&review.text)
                .bind(review.grade)
                .bind(item_id)
                .fetch_one(&mut *tx)
                .await?;
        tx.commit().await?;
        Ok(Some(id))
    }

    async fn recent_reviews(&self, item_id: i64, limit: u32) -> Result<Vec<Review>, AppError> {
        let rows = sqlx::query_as::<_, Review>(
            "SELECT id, text, grade FROM reviews WHERE item_id = $1 ORDER BY id DESC LIMIT $2",
        )
        .bind(item_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, is_staff, is_active FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn upsert_user(&self, username: &str, password_hash: &str, is_staff: bool) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, is_staff)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO UPDATE
                SET password_hash = EXCLUDED.password_hash, is_staff = EXCLUDED.is_staff
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_staff)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Connect to the server's `postgres` database and create the database named in
/// `database_url` if it is missing. No-op when the URL targets `postgres` itself.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_opts, db_name) = maintenance_options(database_url)?;
    let Some(db_name) = db_name.filter(|name| name != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance database on the same server, and the target database name.
fn maintenance_options(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
