pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_PG_DBNAME: &str = "headscale";
pub const DEFAULT_PG_USER: &str = "headscale";

/// Connection settings for the PostgreSQL database that Headscale currently
/// uses.
///
/// The settings are handed to the converter process through its environment.
/// See [`PostgresConfig::to_env_vars`] for the exact contract.
#[derive(Clone, Debug, PartialEq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl PostgresConfig {
    /// Renders the settings as the environment variables the converter
    /// expects.
    ///
    /// Exactly five variables, with the port rendered as a decimal string.
    pub fn to_env_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("POSTGRES_HOST", self.host.clone()),
            ("POSTGRES_PORT", self.port.to_string()),
            ("POSTGRES_DBNAME", self.dbname.clone()),
            ("POSTGRES_USER", self.user.clone()),
            ("POSTGRES_PASSWORD", self.password.clone()),
        ]
    }
}
