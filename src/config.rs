use deadpool_postgres::Config as PgConfig;

use crate::error::LightbnbDbError;

pub const ENV_HOST: &str = "LIGHTBNB_PG_HOST";
pub const ENV_PORT: &str = "LIGHTBNB_PG_PORT";
pub const ENV_USER: &str = "LIGHTBNB_PG_USER";
pub const ENV_PASSWORD: &str = "LIGHTBNB_PG_PASSWORD";
pub const ENV_DBNAME: &str = "LIGHTBNB_PG_DBNAME";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DBNAME: &str = "lightbnb";

/// Connection settings for the LightBnB store.
///
/// ```rust
/// use lightbnb_db::config::DbSettings;
///
/// let settings = DbSettings::new("vagrant", "123");
/// assert_eq!(settings.dbname, "lightbnb");
/// let pg = settings.to_pg_config();
/// assert_eq!(pg.port, Some(5432));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl DbSettings {
    /// Settings for `user`/`password` on the default host, port and database.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            dbname: DEFAULT_DBNAME.to_string(),
        }
    }

    /// Read the `LIGHTBNB_PG_*` environment variables.
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ConfigError` if the user is unset or the port is not a number.
    pub fn from_env() -> Result<Self, LightbnbDbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbSettings::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ConfigError` if the user is unset or the port is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LightbnbDbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = lookup(ENV_USER)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| LightbnbDbError::ConfigError(format!("{ENV_USER} is required")))?;

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                LightbnbDbError::ConfigError(format!("{ENV_PORT}={raw:?} is not a valid port: {e}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            user,
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
            dbname: lookup(ENV_DBNAME).unwrap_or_else(|| DEFAULT_DBNAME.to_string()),
        })
    }

    /// Convert into the pool configuration consumed by
    /// [`ConfigAndPool::new_postgres`](crate::pool::ConfigAndPool::new_postgres).
    #[must_use]
    pub fn to_pg_config(&self) -> PgConfig {
        let mut cfg = PgConfig::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.dbname = Some(self.dbname.clone());
        cfg
    }
}
