//! Library database access.
//!
//! The database corpus is a SQLite music library with `tracks` and
//! `artists` tables. It is opened read-only and loaded into memory once,
//! before any matching starts; nothing here ever writes to it.
//!
//! # Example
//!
//! ```ignore
//! use seekr::db::{db_url, load_records};
//!
//! let records = load_records(&db_url(Path::new("library.db"))).await?;
//! ```

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{Result, ResultExt};
use crate::model::DatabaseRecord;

/// Build a SQLite database URL from a path.
///
/// # Returns
///
/// A SQLite connection URL string (e.g., "sqlite:library.db")
pub fn db_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

/// Open an existing library database without write access.
///
/// # Errors
///
/// [`crate::error::Error::Database`] with context if the file does not
/// exist or the connection cannot be established. The database is never
/// created.
pub async fn open_read_only(db_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(format!("invalid database URL {db_url}"))?
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(format!("failed to open library database {db_url}"))
}

/// One row of the track/artist join, before adaptation.
#[derive(Debug, sqlx::FromRow)]
struct LibraryRow {
    title: Option<String>,
    artist_name: Option<String>,
}

impl From<LibraryRow> for DatabaseRecord {
    fn from(row: LibraryRow) -> Self {
        DatabaseRecord::new(row.title.unwrap_or_default(), row.artist_name.as_deref())
    }
}

/// Load every track with its artist name, in track id order.
///
/// Tracks without an artist get `artist: None`; a NULL title becomes "".
pub async fn fetch_records(pool: &SqlitePool) -> Result<Vec<DatabaseRecord>> {
    let rows = sqlx::query_as::<_, LibraryRow>(
        r#"
        SELECT t.title AS title, a.name AS artist_name
        FROM tracks t
        LEFT JOIN artists a ON t.artist_id = a.id
        ORDER BY t.id
        "#,
    )
    .fetch_all(pool)
    .await
    .with_context("failed to read library tracks")?;

    debug!(target: "seekr::db", rows = rows.len(), "Loaded library rows");
    Ok(rows.into_iter().map(DatabaseRecord::from).collect())
}

/// Open, load and close the library database.
///
/// Any failure here aborts the run; there are no partial results.
pub async fn load_records(db_url: &str) -> Result<Vec<DatabaseRecord>> {
    let pool = open_read_only(db_url).await?;
    let records = fetch_records(&pool).await;
    pool.close().await;

    let records = records?;
    info!(target: "seekr::db", tracks = records.len(), "Library loaded");
    Ok(records)
}
