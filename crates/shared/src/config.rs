//! Application configuration management.
//!
//! Configuration is layered: `config/default.toml`, then `config/{RUN_MODE}.toml`,
//! then `DOMPET__SECTION__KEY` environment variables. A handful of plain
//! variables (`DATABASE_URL`, `PORT`, `JWT_SECRET`, `CLIENT_URL`, `DB_*`) are
//! honored on top for compatibility with common hosting platforms.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production: internal error details are hidden from clients.
    Production,
    /// Anything else.
    #[default]
    Development,
}

impl Environment {
    /// Maps a `RUN_MODE` value; only `production` is production.
    #[must_use]
    pub fn from_run_mode(run_mode: &str) -> Self {
        if run_mode.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Returns the configuration value for this environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the individual fields.
    pub url: Option<String>,
    /// Database host.
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port.
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Database user.
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Database name.
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Returns the connection URL, composing one from the individual fields
    /// when no explicit URL is configured.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }

        let credentials = if self.password.is_empty() {
            self.user.clone()
        } else {
            format!("{}:{}", self.user, self.password)
        };

        format!(
            "postgres://{credentials}@{}:{}/{}",
            self.host, self.port, self.name
        )
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "management_uang".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    604_800 // 7 days
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to make credentialed requests.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8080".to_string()]
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, e.g. when no JWT
    /// secret is configured.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let client_origins = env("CLIENT_URL").map(|origins| {
            origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

        let config = config::Config::builder()
            .set_default("environment", Environment::from_run_mode(&run_mode).as_str())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DOMPET").separator("__"))
            .set_override_option("database.url", env("DATABASE_URL"))?
            .set_override_option("database.host", env("DB_HOST"))?
            .set_override_option("database.user", env("DB_USER"))?
            .set_override_option("database.password", env("DB_PASSWORD"))?
            .set_override_option("database.name", env("DB_NAME"))?
            .set_override_option("server.port", env("PORT"))?
            .set_override_option("jwt.secret", env("JWT_SECRET"))?
            .set_override_option("cors.allowed_origins", client_origins)?
            .build()?;

        config.try_deserialize()
    }

    /// Returns true when running in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEARED: [(&str, Option<&str>); 11] = [
        ("RUN_MODE", None),
        ("DATABASE_URL", None),
        ("DB_HOST", None),
        ("DB_USER", None),
        ("DB_PASSWORD", None),
        ("DB_NAME", None),
        ("PORT", None),
        ("JWT_SECRET", None),
        ("CLIENT_URL", None),
        ("DOMPET__JWT__SECRET", None),
        ("DOMPET__SERVER__PORT", None),
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = CLEARED
            .iter()
            .filter(|(k, _)| !vars.iter().any(|(v, _)| v == k))
            .copied()
            .collect();
        all.extend_from_slice(vars);
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_defaults_with_only_secret() {
        with_env(&[("JWT_SECRET", Some("s3cret"))], || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.environment, Environment::Development);
            assert!(!config.is_production());
            assert_eq!(config.server.port, 5000);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.jwt.secret, "s3cret");
            assert_eq!(config.jwt.token_expiry_secs, 604_800);
            assert_eq!(config.database.max_connections, 10);
            assert_eq!(config.cors.allowed_origins, vec!["http://localhost:8080"]);
            assert_eq!(
                config.database.connection_url(),
                "postgres://postgres@localhost:5432/management_uang"
            );
        });
    }

    #[test]
    fn test_missing_secret_fails() {
        with_env(&[], || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_plain_env_overrides() {
        with_env(
            &[
                ("JWT_SECRET", Some("s3cret")),
                ("DATABASE_URL", Some("postgres://u:p@db:5432/app")),
                ("PORT", Some("8081")),
                ("CLIENT_URL", Some("https://a.example, https://b.example")),
                ("RUN_MODE", Some("production")),
            ],
            || {
                let config = AppConfig::load().unwrap();

                assert!(config.is_production());
                assert_eq!(config.server.port, 8081);
                assert_eq!(
                    config.database.connection_url(),
                    "postgres://u:p@db:5432/app"
                );
                assert_eq!(
                    config.cors.allowed_origins,
                    vec!["https://a.example", "https://b.example"]
                );
            },
        );
    }

    #[test]
    fn test_prefixed_env_overrides() {
        with_env(
            &[
                ("DOMPET__JWT__SECRET", Some("from-prefix")),
                ("DOMPET__SERVER__PORT", Some("9000")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.jwt.secret, "from-prefix");
                assert_eq!(config.server.port, 9000);
            },
        );
    }

    #[test]
    fn test_environment_from_run_mode() {
        assert_eq!(Environment::from_run_mode("production"), Environment::Production);
        for mode in ["development", "staging", "test", "dev", ""] {
            assert_eq!(Environment::from_run_mode(mode), Environment::Development);
        }
    }

    #[test]
    fn test_unknown_run_mode_is_development() {
        with_env(
            &[("JWT_SECRET", Some("s")), ("RUN_MODE", Some("staging"))],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.environment, Environment::Development);
            },
        );
    }

    #[test]
    fn test_connection_url_from_parts() {
        let db = DatabaseConfig {
            host: "db.internal".to_string(),
            user: "app".to_string(),
            password: "pw".to_string(),
            name: "money".to_string(),
            ..DatabaseConfig::default()
        };
        assert_eq!(db.connection_url(), "postgres://app:pw@db.internal:5432/money");
    }
}
