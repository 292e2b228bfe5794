mod migrate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;

use hbts_core::config;
use hbts_core::config::PostgresConfig;
use hbts_core::convert;
use hbts_core::convert::ConvertCommand;
use hbts_core::error::Error;

/// Migrate a Headscale PostgreSQL database back to SQLite.
///
/// The destination SQLite database file must already exist; get it from an
/// empty Headscale server run. The actual data migration is performed by the
/// vendored `headscalebacktosqlite` converter, which this command configures,
/// invokes, and cleans up after.
#[derive(Parser)]
#[command(author, version, about)]
struct Opt {
    /// Host name of the PostgreSQL server.
    #[arg(long, env = "HBTS_PG_HOST")]
    pg_host: String,

    /// Port of the PostgreSQL server.
    #[arg(long, env = "HBTS_PG_PORT", default_value_t = config::DEFAULT_PG_PORT)]
    pg_port: u16,

    /// Name of the Headscale database.
    #[arg(long, env = "HBTS_PG_DB", default_value = config::DEFAULT_PG_DBNAME)]
    pg_db: String,

    /// PostgreSQL user.
    #[arg(long, env = "HBTS_PG_USER", default_value = config::DEFAULT_PG_USER)]
    pg_user: String,

    /// PostgreSQL password.
    #[arg(long, env = "HBTS_PG_PASSWORD")]
    pg_password: String,

    /// Path to the destination SQLite database file.
    #[arg(long, env = "HBTS_SQLITE_OUT", default_value = "db.sqlite")]
    sqlite_out: PathBuf,

    /// Path to the vendored converter script.
    #[arg(long, default_value = convert::DEFAULT_CONVERT_SCRIPT)]
    convert_script: PathBuf,

    /// Logging format.
    #[arg(long, value_enum, env = "HBTS_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    hbts_core::tracing_ext::init_tracing(match opt.log_format {
        LogFormat::Text => "text",
        LogFormat::Json => "json",
    });

    let pg = PostgresConfig {
        host: opt.pg_host,
        port: opt.pg_port,
        dbname: opt.pg_db,
        user: opt.pg_user,
        password: opt.pg_password,
    };
    let convert = ConvertCommand::new(opt.convert_script);

    match migrate::run(&convert, &pg, &opt.sqlite_out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::SqliteDbNotFound(path)) => {
            eprintln!(
                r#"error: missing SQLite database file "{}" must already exist."#,
                path.display()
            );
            eprintln!("       get it from an empty Headscale server run.");
            ExitCode::from(1)
        }
        Err(err) => {
            tracing::error!(%err);
            ExitCode::from(2)
        }
    }
}
