//! Application-level configuration resolved from the environment at boot.

use std::{env, path::PathBuf};

/// Default port the server listens on.
const DEFAULT_PORT: u16 = 3000;
/// Default location of the durable score store document.
const DEFAULT_DB_PATH: &str = "data/scores.json";
/// Default location of the country catalog cache.
const DEFAULT_COUNTRIES_CACHE_PATH: &str = "data/countries.cache.json";
/// ISO 3166-1 alpha-2 map (code -> display name) used to bootstrap the catalog.
const DEFAULT_COUNTRIES_URL: &str = "https://gist.githubusercontent.com/ssskip/5a94bfcd2835bf1dea52/raw/59272a2d1c2122f0cedd83a76780a01d50726d98/ISO3166-1.alpha2.json";

/// Environment variable overriding the listen port.
const PORT_ENV: &str = "PORT";
/// Fallback environment variable for the listen port.
const PORT_FALLBACK_ENV: &str = "SERVER_PORT";
/// Environment variable overriding [`DEFAULT_DB_PATH`].
const DB_PATH_ENV: &str = "FLAGZIM_DB_PATH";
/// Environment variable overriding [`DEFAULT_COUNTRIES_CACHE_PATH`].
const COUNTRIES_CACHE_ENV: &str = "FLAGZIM_COUNTRIES_CACHE";
/// Environment variable overriding [`DEFAULT_COUNTRIES_URL`].
const COUNTRIES_URL_ENV: &str = "FLAGZIM_COUNTRIES_URL";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    port: u16,
    db_path: PathBuf,
    countries_cache_path: PathBuf,
    countries_source_url: String,
}

impl AppConfig {
    /// Resolve the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let port = env::var(PORT_ENV)
            .or_else(|_| env::var(PORT_FALLBACK_ENV))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            db_path: path_from_env(DB_PATH_ENV, DEFAULT_DB_PATH),
            countries_cache_path: path_from_env(
                COUNTRIES_CACHE_ENV,
                DEFAULT_COUNTRIES_CACHE_PATH,
            ),
            countries_source_url: env::var(COUNTRIES_URL_ENV)
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string()),
        }
    }

    /// Port the HTTP server binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Location of the score store document on disk.
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Location of the country catalog cache on disk.
    pub fn countries_cache_path(&self) -> &PathBuf {
        &self.countries_cache_path
    }

    /// URL of the upstream ISO alpha-2 country map.
    pub fn countries_source_url(&self) -> &str {
        &self.countries_source_url
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            countries_cache_path: PathBuf::from(DEFAULT_COUNTRIES_CACHE_PATH),
            countries_source_url: DEFAULT_COUNTRIES_URL.to_string(),
        }
    }
}

/// Read a path override from the environment, ignoring empty values.
fn path_from_env(var: &str, default: &str) -> PathBuf {
    env::var_os(var)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(default))
}
