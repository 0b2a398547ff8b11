//! Test utilities and fixtures for seekr tests.
//!
//! Provides a throwaway library database with the track/artist schema and a
//! helper for laying out fake music folders.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_library_db, insert_track, touch};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, dir) = temp_library_db().await;
//!     insert_track(&pool, "Strobe", Some("Deadmau5")).await;
//!     touch(dir.path(), "Deadmau5/Strobe.flac");
//! }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tempfile::TempDir;

/// Schema of the library database the corpus loader reads.
const LIBRARY_SCHEMA: &str = r#"
CREATE TABLE artists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE albums (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    artist_id INTEGER REFERENCES artists(id),
    year INTEGER
);
CREATE TABLE tracks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    artist_id INTEGER REFERENCES artists(id),
    album_id INTEGER REFERENCES albums(id),
    path TEXT NOT NULL UNIQUE,
    duration INTEGER,
    track_number INTEGER
);
"#;

/// Creates a writable library database at `library.db` in a temp directory.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_library_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("library.db");

    let options = SqliteConnectOptions::from_str(&crate::db::db_url(&db_path))
        .expect("Failed to parse database URL")
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::raw_sql(LIBRARY_SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create schema");

    (pool, dir)
}

/// Inserts a track (and its artist, if new) and returns the track ID.
pub async fn insert_track(pool: &SqlitePool, title: &str, artist: Option<&str>) -> i64 {
    let artist_id = match artist {
        Some(name) => {
            sqlx::query("INSERT OR IGNORE INTO artists (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .expect("Failed to insert artist");
            let (id,): (i64,) = sqlx::query_as("SELECT id FROM artists WHERE name = ?")
                .bind(name)
                .fetch_one(pool)
                .await
                .expect("Failed to look up artist");
            Some(id)
        }
        None => None,
    };

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await
        .expect("Failed to count tracks");

    sqlx::query("INSERT INTO tracks (title, artist_id, path) VALUES (?, ?, ?)")
        .bind(title)
        .bind(artist_id)
        .bind(format!("/library/{}.mp3", count.0))
        .execute(pool)
        .await
        .expect("Failed to insert track")
        .last_insert_rowid()
}

/// Creates an empty file at `root/relative`, making parent folders.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create folders");
    }
    std::fs::File::create(&path).expect("Failed to create file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_library_db_creates_working_database() {
        let (pool, _dir) = temp_library_db().await;

        let id = insert_track(&pool, "Strobe", Some("Deadmau5")).await;
        assert!(id > 0);

        let again = insert_track(&pool, "Ghosts 'n' Stuff", Some("Deadmau5")).await;
        assert!(again > id);

        let (artists,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(artists, 1);
    }

    #[test]
    fn test_touch_creates_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "a/b/c.mp3");
        assert!(path.is_file());
        assert!(dir.path().join("a/b").is_dir());
    }
}
