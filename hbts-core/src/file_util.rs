use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Removes a file if it exists.
///
/// Returns `true` when the file was removed. A missing file is not an error;
/// any other failure is logged and reported as `false`.
pub fn remove_if_exists<P>(path: P) -> bool
where
    P: AsRef<Path>,
    P: std::fmt::Debug,
{
    match std::fs::remove_file(&path) {
        Ok(_) => {
            tracing::debug!(?path, "Removed");
            true
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
        Err(err) => {
            tracing::error!(%err, ?path, "Failed to remove");
            false
        }
    }
}

/// Builds the path of a sibling whose file name is the original name with
/// `suffix` appended, like the `-wal` and `-shm` files SQLite creates next to
/// a database file.
pub fn append_file_name<P, S>(path: P, suffix: S) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<std::ffi::OsStr>,
{
    let path = path.as_ref();
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
