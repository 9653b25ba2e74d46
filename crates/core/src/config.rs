//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! the pieces that need it. The intent is to avoid reading process-wide
//! environment variables during request handling, which can lead to
//! inconsistent behaviour in multi-threaded runtimes and test harnesses.

const DEFAULT_PORT: u16 = 8080;

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is required")]
    MissingDatabaseUrl,
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required; `PORT` defaults to 8080. Loading an
    /// optional `.env` file is the binary's job (`dotenvy`), before this
    /// runs.
    ///
    /// # Errors
    /// Returns an error if `DATABASE_URL` is unset or empty, or if `PORT`
    /// is set but does not parse as a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_default();
        if database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let port = match std::env::var("PORT") {
            Ok(raw) if !raw.is_empty() => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            _ => DEFAULT_PORT,
        };

        Ok(Self { database_url, port })
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
