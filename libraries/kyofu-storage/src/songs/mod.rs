//! Song storage
//!
//! Paths are relative to the library root. Reads take the pool; mutators are
//! generic over any `SQLite` executor so [`crate::CatalogSession`] can run
//! them inside its transaction.

use crate::pattern::{below_directory_pattern, starts_with_pattern};
use crate::{timestamp_from_db, Result, StorageError};
use chrono::{DateTime, Utc};
use kyofu_core::{CreateSong, LibraryId, Song, SongFields, SongId};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteExecutor, SqlitePool};

const SELECT_SONGS: &str = r#"
    SELECT id, library_id, file_path, title, album, artist, album_artist,
           genre, track_number, disc_number, release_year, modified
    FROM songs
    WHERE library_id = "#;

fn column_u32(row: &SqliteRow, column: &str) -> Result<u32> {
    let value = row.get::<i64, _>(column);
    u32::try_from(value)
        .map_err(|_| StorageError::InvalidData(format!("{} out of range: {}", column, value)))
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let release_year = row.get::<i64, _>("release_year");

    Ok(Song {
        id: row.get("id"),
        library_id: row.get("library_id"),
        file_path: row.get("file_path"),
        fields: SongFields {
            title: row.get("title"),
            album: row.get("album"),
            artist: row.get("artist"),
            album_artist: row.get("album_artist"),
            genre: row.get("genre"),
            track_number: column_u32(row, "track_number")?,
            disc_number: column_u32(row, "disc_number")?,
            release_year: i32::try_from(release_year).map_err(|_| {
                StorageError::InvalidData(format!("release_year out of range: {}", release_year))
            })?,
        },
        modified: timestamp_from_db(row.get("modified"))?,
    })
}

/// Find the song tracked at `file_path`
pub async fn find(
    pool: &SqlitePool,
    library_id: LibraryId,
    file_path: &str,
) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("{} ? AND file_path = ?", SELECT_SONGS))
        .bind(library_id)
        .bind(file_path)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// All songs of a library ordered by path
pub async fn list(pool: &SqlitePool, library_id: LibraryId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("{} ? ORDER BY file_path", SELECT_SONGS))
        .bind(library_id)
        .fetch_all(pool)
        .await?;

    rows.iter().map(song_from_row).collect()
}

/// Songs whose path equals one of `paths` or lies below it as a directory
pub async fn list_under(
    pool: &SqlitePool,
    library_id: LibraryId,
    paths: &[String],
) -> Result<Vec<Song>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SONGS);
    builder.push_bind(library_id).push(" AND (");
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder
            .push("file_path = ")
            .push_bind(path.clone())
            .push(" OR file_path LIKE ")
            .push_bind(below_directory_pattern(path))
            .push(r" ESCAPE '\'");
    }
    builder.push(") ORDER BY file_path");

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(song_from_row).collect()
}

/// Songs whose path starts with any of `prefixes`
///
/// Prefixes are plain string prefixes, not directory boundaries: `"a"`
/// selects both `a/01.mp3` and `ab.mp3`.
pub async fn list_by_prefixes(
    pool: &SqlitePool,
    library_id: LibraryId,
    prefixes: &[String],
) -> Result<Vec<Song>> {
    if prefixes.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SONGS);
    builder.push_bind(library_id).push(" AND (");
    for (i, prefix) in prefixes.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder
            .push("file_path LIKE ")
            .push_bind(starts_with_pattern(prefix))
            .push(r" ESCAPE '\'");
    }
    builder.push(") ORDER BY file_path");

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(song_from_row).collect()
}

/// Number of songs tracked for a library
pub async fn count(pool: &SqlitePool, library_id: LibraryId) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs WHERE library_id = ?")
        .bind(library_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Latest `modified` timestamp among a library's songs
pub async fn max_modified(
    pool: &SqlitePool,
    library_id: LibraryId,
) -> Result<Option<DateTime<Utc>>> {
    let secs: Option<i64> =
        sqlx::query_scalar("SELECT MAX(modified) FROM songs WHERE library_id = ?")
            .bind(library_id)
            .fetch_one(pool)
            .await?;

    secs.map(timestamp_from_db).transpose()
}

/// Insert a song, returning its new ID
///
/// When `modified` is `None` the row is stamped with the current time.
pub async fn insert<'e, E>(executor: E, song: &CreateSong) -> Result<SongId>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO songs (
            library_id, file_path, title, album, artist, album_artist,
            genre, track_number, disc_number, release_year, modified
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                COALESCE(?, CAST(strftime('%s', 'now') AS INTEGER)))
        "#,
    )
    .bind(song.library_id)
    .bind(&song.file_path)
    .bind(&song.fields.title)
    .bind(&song.fields.album)
    .bind(&song.fields.artist)
    .bind(&song.fields.album_artist)
    .bind(&song.fields.genre)
    .bind(i64::from(song.fields.track_number))
    .bind(i64::from(song.fields.disc_number))
    .bind(i64::from(song.fields.release_year))
    .bind(song.modified.map(|m| m.timestamp()))
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field and `modified` of an existing song
pub async fn update<'e, E>(executor: E, song: &Song) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, album = ?, artist = ?, album_artist = ?, genre = ?,
            track_number = ?, disc_number = ?, release_year = ?, modified = ?
        WHERE id = ?
        "#,
    )
    .bind(&song.fields.title)
    .bind(&song.fields.album)
    .bind(&song.fields.artist)
    .bind(&song.fields.album_artist)
    .bind(&song.fields.genre)
    .bind(i64::from(song.fields.track_number))
    .bind(i64::from(song.fields.disc_number))
    .bind(i64::from(song.fields.release_year))
    .bind(song.modified.timestamp())
    .bind(song.id)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Song", song.id.to_string()));
    }

    Ok(())
}

/// Delete a song by ID, returning whether a row was removed
pub async fn delete<'e, E>(executor: E, id: SongId) -> Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
