//! Schema versioning for the key-value backend.
//!
//! The metadata table records the applied version. Opening a database runs
//! every step above that version in order, inside one transaction, and
//! refuses databases written by a newer schema.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, V1_STATEMENTS};

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Ordered migration steps: `(version, statements)`.
const STEPS: &[(i32, &[&str])] = &[(1, V1_STATEMENTS)];

/// Bring the database schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the stored version is newer than this build supports
/// or a migration statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported {CURRENT_VERSION}"
            ),
        });
    }
    if version == CURRENT_VERSION {
        debug!("Schema already at version {}", version);
        return Ok(());
    }

    run_migrations(conn, version)
}

/// Get the schema version recorded in the database, 0 for a fresh one.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

fn run_migrations(conn: &Connection, from_version: i32) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for (version, statements) in STEPS.iter().filter(|(v, _)| *v > from_version) {
        for statement in *statements {
            tx.execute(statement, [])?;
        }
        set_schema_version(&tx, *version)?;
        info!("Applied schema migration to version {}", version);
    }
    tx.commit()?;

    let applied = get_schema_version(conn)?;
    if applied != CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!("no migration path from version {from_version} to {CURRENT_VERSION}"),
        });
    }
    Ok(())
}
