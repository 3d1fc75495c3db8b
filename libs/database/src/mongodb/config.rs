#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or};

/// Connection string used when no URL is configured
pub const DEFAULT_URL: &str = "mongodb://localhost:27017";

/// Database name used when none is configured
pub const DEFAULT_DATABASE: &str = "appdb";

/// MongoDB database configuration
///
/// This struct holds MongoDB connection settings.
/// It can be constructed manually or loaded from environment variables (with `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// // Local defaults
/// let config = MongoConfig::default();
///
/// // With database name
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds. Bounds how long an operation
    /// waits before failing when the server is unreachable.
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a MongoConfig with a specific database name
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
    /// ```
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Set the server selection timeout
    pub fn with_server_selection_timeout(mut self, secs: u64) -> Self {
        self.server_selection_timeout_secs = secs;
        self
    }

    /// Get a reference to the MongoDB URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 0,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 5,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Every variable is optional:
/// - `DATABASE_URL`, then `MONGODB_URL`, then `MONGO_URL` (default: `mongodb://localhost:27017`)
/// - `DATABASE_NAME`, then `MONGODB_DATABASE`, then `MONGO_DATABASE` (default: `appdb`)
/// - `MONGODB_APP_NAME` - Application name for server logs
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 0)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 5)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = env_first_of(&["DATABASE_URL", "MONGODB_URL", "MONGO_URL"])
            .unwrap_or(defaults.url);

        let database = env_first_of(&["DATABASE_NAME", "MONGODB_DATABASE", "MONGO_DATABASE"])
            .unwrap_or(defaults.database);

        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_default_points_at_local_instance() {
        let config = MongoConfig::default();
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "appdb");
        assert_eq!(config.server_selection_timeout_secs, 5);
    }

    #[test]
    fn test_mongo_config_with_database() {
        let config = MongoConfig::with_database("mongodb://db:27017", "shop");
        assert_eq!(config.url(), "mongodb://db:27017");
        assert_eq!(config.database(), "shop");
        assert_eq!(config.max_pool_size, 100);
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::default()
            .with_app_name("storefront")
            .with_server_selection_timeout(1);
        assert_eq!(config.app_name.as_deref(), Some("storefront"));
        assert_eq!(config.server_selection_timeout_secs, 1);
    }

    #[cfg(feature = "config")]
    const MONGO_VARS: [&str; 11] = [
        "DATABASE_URL",
        "MONGODB_URL",
        "MONGO_URL",
        "DATABASE_NAME",
        "MONGODB_DATABASE",
        "MONGO_DATABASE",
        "MONGODB_APP_NAME",
        "MONGODB_MAX_POOL_SIZE",
        "MONGODB_MIN_POOL_SIZE",
        "MONGODB_CONNECT_TIMEOUT_SECS",
        "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
    ];

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_defaults() {
        temp_env::with_vars_unset(MONGO_VARS, || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.url, DEFAULT_URL);
            assert_eq!(config.database, DEFAULT_DATABASE);
            assert!(config.app_name.is_none());
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_primary_names() {
        temp_env::with_vars_unset(MONGO_VARS, || {
            temp_env::with_vars(
                [
                    ("DATABASE_URL", Some("mongodb://primary:27017")),
                    ("MONGODB_URL", Some("mongodb://secondary:27017")),
                    ("DATABASE_NAME", Some("shop")),
                ],
                || {
                    let config = MongoConfig::from_env().unwrap();
                    assert_eq!(config.url, "mongodb://primary:27017");
                    assert_eq!(config.database, "shop");
                },
            );
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallback_names() {
        temp_env::with_vars_unset(MONGO_VARS, || {
            temp_env::with_vars(
                [
                    ("MONGO_URL", Some("mongodb://fallback:27017")),
                    ("MONGO_DATABASE", Some("fallbackdb")),
                ],
                || {
                    let config = MongoConfig::from_env().unwrap();
                    assert_eq!(config.url, "mongodb://fallback:27017");
                    assert_eq!(config.database, "fallbackdb");
                },
            );
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_invalid_pool_size() {
        temp_env::with_vars_unset(MONGO_VARS, || {
            temp_env::with_var("MONGODB_MAX_POOL_SIZE", Some("many"), || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
            });
        });
    }
}
