use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use crate::config::PostgresConfig;

/// Default location of the vendored converter, relative to the current
/// working directory.
pub const DEFAULT_CONVERT_SCRIPT: &str = "vendor/headscalebacktosqlite/convert.py";

/// Contract with the external converter.
///
/// An implementation performs the entire migration synchronously and returns
/// on completion or fails with an [`Error`]. The launcher treats the call as
/// fully opaque: no knowledge of the schema mapping, no partial-failure
/// semantics, no retry.
pub trait Convert {
    fn convert(&self, pg: &PostgresConfig, sqlite_db: &Path) -> Result<(), Error>;
}

/// Runs the vendored converter as a child process.
///
/// Connection settings are injected through the environment: the five
/// `POSTGRES_*` variables from [`PostgresConfig::to_env_vars`] plus
/// `SQLITE_DB_PATH` holding the destination file path. The script must be an
/// executable file (a shebang suffices). Stdout and stderr are inherited so
/// that the converter's own progress output reaches the operator unchanged.
pub struct ConvertCommand {
    script: PathBuf,
}

impl ConvertCommand {
    pub fn new<P: Into<PathBuf>>(script: P) -> Self {
        ConvertCommand {
            script: script.into(),
        }
    }
}

impl Default for ConvertCommand {
    fn default() -> Self {
        ConvertCommand::new(DEFAULT_CONVERT_SCRIPT)
    }
}

impl Convert for ConvertCommand {
    fn convert(&self, pg: &PostgresConfig, sqlite_db: &Path) -> Result<(), Error> {
        // Checked before spawning in order to distinguish a missing script
        // from a failure inside the converter.
        if !self.script.is_file() {
            return Err(Error::ScriptNotFound(self.script.clone()));
        }
        tracing::info!(script = %self.script.display(), "Spawning the converter");
        let status = Command::new(&self.script)
            .envs(pg.to_env_vars())
            .env("SQLITE_DB_PATH", sqlite_db)
            .stdin(Stdio::null())
            .status()
            .map_err(|err| Error::UnableToSpawn(self.script.display().to_string(), err))?;
        if status.success() {
            tracing::debug!(script = %self.script.display(), "Converter finished");
            Ok(())
        } else {
            Err(Error::Failed(status))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Converter script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),
    #[error("Unable to spawn: {0}: {1}")]
    UnableToSpawn(String, io::Error),
    #[error("Converter exited with {0}")]
    Failed(ExitStatus),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;
    use test_log::test;

    fn pg_config() -> PostgresConfig {
        PostgresConfig {
            host: "db1".to_string(),
            port: 5432,
            dbname: "headscale".to_string(),
            user: "headscale".to_string(),
            password: "secret".to_string(),
        }
    }

    fn make_script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("convert.py");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_convert_script_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("no-such-convert.py");

        let convert = ConvertCommand::new(&script);
        let result = convert.convert(&pg_config(), Path::new("db.sqlite"));
        assert_matches!(result, Err(Error::ScriptNotFound(path)) => {
            assert_eq!(path, script);
        });
    }

    #[test]
    fn test_convert_env_contract() {
        let temp_dir = TempDir::new().unwrap();
        let sqlite_db = temp_dir.path().join("db.sqlite");
        let script = make_script(
            &temp_dir,
            &format!(
                concat!(
                    "[ \"$POSTGRES_HOST\" = db1 ] || exit 1\n",
                    "[ \"$POSTGRES_PORT\" = 5432 ] || exit 2\n",
                    "[ \"$POSTGRES_DBNAME\" = headscale ] || exit 3\n",
                    "[ \"$POSTGRES_USER\" = headscale ] || exit 4\n",
                    "[ \"$POSTGRES_PASSWORD\" = secret ] || exit 5\n",
                    "[ \"$SQLITE_DB_PATH\" = \"{}\" ] || exit 6\n",
                    "exit 0",
                ),
                sqlite_db.display()
            ),
        );

        let convert = ConvertCommand::new(&script);
        let result = convert.convert(&pg_config(), &sqlite_db);
        assert_matches!(result, Ok(()));
    }

    #[test]
    fn test_convert_failed() {
        let temp_dir = TempDir::new().unwrap();
        let script = make_script(&temp_dir, "exit 37");

        let convert = ConvertCommand::new(&script);
        let result = convert.convert(&pg_config(), Path::new("db.sqlite"));
        assert_matches!(result, Err(Error::Failed(status)) => {
            assert_eq!(status.code(), Some(37));
        });
    }
}
