
use std::path::Path;

use hbts_core::config::PostgresConfig;
use hbts_core::convert::Convert;
use hbts_core::error::Error;
use hbts_core::file_util;

/// Migrates the PostgreSQL database into `sqlite_db`.
///
/// The SQLite file is created by an empty Headscale server run, never by this
/// launcher; a missing file is a fatal precondition failure and the converter
/// is not invoked. Cleanup of the SQLite runtime files only happens after the
/// converter returned successfully.
pub fn run<C>(convert: &C, pg: &PostgresConfig, sqlite_db: &Path) -> Result<(), Error>
where
    C: Convert,
{
    if !sqlite_db.is_file() {
        return Err(Error::SqliteDbNotFound(sqlite_db.to_owned()));
    }

    convert.convert(pg, sqlite_db)?;

    // The converter may leave `-wal` and `-shm` files next to the database.
    // Each removal is best-effort and independent of the other.
    file_util::remove_if_exists(file_util::append_file_name(sqlite_db, "-wal"));
    file_util::remove_if_exists(file_util::append_file_name(sqlite_db, "-shm"));

    tracing::info!(db = %sqlite_db.display(), "Migrated successfully");
    Ok(())
}
