//! SQLite artefact holding the cleaned streets.

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use rusqlite::{Connection, Error as SqliteError, Transaction};
use streets_core::CleanedStreet;
use thiserror::Error;

/// Errors raised when persisting cleaned streets to SQLite.
#[derive(Debug, Error)]
pub enum PersistStreetsError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path whose directory could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin street persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Recreating the `streets` table failed.
    #[error("failed to create streets table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An OSM identifier could not be represented as an SQLite integer.
    #[error("OSM id {osm_id} exceeds SQLite i64 range")]
    OsmIdOutOfRange {
        /// Identifier that failed the conversion.
        osm_id: u64,
    },
    /// Preparing the insert statement failed.
    #[error("failed to prepare street insert statement")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a street row failed.
    #[error("failed to persist street {name:?}")]
    PersistRow {
        /// Name of the street being persisted.
        name: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit street persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

const SCHEMA: &str = "
    DROP TABLE IF EXISTS streets;
    CREATE TABLE streets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        highway_type TEXT NOT NULL,
        area_code TEXT,
        borough TEXT,
        county TEXT,
        post_town TEXT,
        lon REAL,
        lat REAL,
        osm_id INTEGER
    );
    CREATE INDEX streets_area_code ON streets (area_code);
";

/// Replace the contents of the `streets` table with `streets`.
///
/// Parent directories are created automatically. Rows are written in one
/// transaction, so a failure leaves the previous contents in place. Returns
/// the number of rows written.
pub fn persist_streets_to_sqlite(
    path: &Utf8Path,
    streets: &[CleanedStreet],
) -> Result<usize, PersistStreetsError> {
    streets_fs::ensure_parent_dir(path).map_err(|source| {
        PersistStreetsError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistStreetsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistStreetsError::BeginTransaction { source })?;
    transaction
        .execute_batch(SCHEMA)
        .map_err(|source| PersistStreetsError::CreateSchema { source })?;
    persist_rows(&transaction, streets)?;
    transaction
        .commit()
        .map_err(|source| PersistStreetsError::Commit { source })?;

    info!("Wrote {} streets to {path}", streets.len());
    Ok(streets.len())
}

fn persist_rows(
    transaction: &Transaction<'_>,
    streets: &[CleanedStreet],
) -> Result<(), PersistStreetsError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO streets
                 (name, highway_type, area_code, borough, county, post_town, lon, lat, osm_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(|source| PersistStreetsError::PrepareInsert { source })?;

    for cleaned in streets {
        let street = &cleaned.street;
        let osm_id = street
            .osm_id
            .map(|id| {
                i64::try_from(id).map_err(|_| PersistStreetsError::OsmIdOutOfRange { osm_id: id })
            })
            .transpose()?;
        statement
            .execute((
                &street.name,
                &street.highway_type,
                cleaned.area_code.as_deref(),
                cleaned.borough.as_deref(),
                cleaned.county.as_deref(),
                cleaned.post_town.as_deref(),
                street.longitude(),
                street.latitude(),
                osm_id,
            ))
            .map_err(|source| PersistStreetsError::PersistRow {
                name: street.name.clone(),
                source,
            })?;
    }
    Ok(())
}
