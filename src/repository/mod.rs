use std::backtrace::Backtrace;
use std::path::Path;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

pub mod metadata_repository;

/// opens a new connection to the configured database with foreign keys enforced.
/// Callers must handle closing the connection
#[cfg(not(test))]
pub fn open_connection() -> Result<Connection> {
    use crate::config::THREAD_TAGS_CONFIG;

    let con = Connection::open_with_flags(
        Path::new(THREAD_TAGS_CONFIG.database.location.as_str()),
        OpenFlags::default(),
    )?;
    con.pragma_update(None, "foreign_keys", true)?;
    Ok(con)
}

#[cfg(test)]
pub fn open_connection() -> Result<Connection> {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    let con = Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default())?;
    con.pragma_update(None, "foreign_keys", true)?;
    Ok(con)
}

/// opens a connection, logging the failure if there is one
pub fn connect() -> Result<Connection> {
    open_connection().map_err(|e| {
        log::error!(
            "Failed to open a database connection! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        e
    })
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql)
}

/// handles checking if the database exists. If not, the tables are created
pub fn initialize_db() -> Result<()> {
    let con = open_connection()?;
    match metadata_repository::get_version(&con) {
        Ok(version) => log::info!("Database is at version {version}"),
        Err(_) => {
            // tables haven't been created yet
            log::info!("No database found, creating tables...");
            create_db(&con)?;
        }
    };
    con.close().map_err(|(_, e)| e)
}

/// true if the error is sqlite rejecting a write because of a unique constraint
pub fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// closes the connection. sqlite refusing to close is only logged, since the connection is dropped either way
pub fn close_connection(con: Connection) {
    if let Err((_, e)) = con.close() {
        log::warn!("Failed to close database connection: {e:?}");
    }
}
