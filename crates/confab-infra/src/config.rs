//! Backend configuration loader for Confab.
//!
//! Reads `config.toml` from the data directory (`~/.confab/` in
//! production) and deserializes it into [`BackendConfig`]. Falls back
//! to defaults when the file is missing or malformed, so a fresh
//! install talks to the demo backend without any setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Demo backend project, matching the published guest credentials.
const DEFAULT_SUBDOMAIN: &str = "tituqjovnpmvlxxjbtto";
const DEFAULT_REGION: &str = "ap-south-1";

/// Backend endpoints configuration.
///
/// By default the auth and GraphQL URLs are derived from the hosted
/// project's subdomain and region. Either can be overridden explicitly
/// for self-hosted backends or tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Hosted project subdomain.
    pub subdomain: String,
    /// Hosted project region.
    pub region: String,
    /// Explicit auth base URL; overrides the derived one when set.
    pub auth_url: Option<String>,
    /// Explicit GraphQL endpoint URL; overrides the derived one when set.
    pub graphql_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            subdomain: DEFAULT_SUBDOMAIN.to_string(),
            region: DEFAULT_REGION.to_string(),
            auth_url: None,
            graphql_url: None,
        }
    }
}

impl BackendConfig {
    /// Base URL of the auth service (no trailing slash).
    pub fn auth_url(&self) -> String {
        self.auth_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.auth.{}.nhost.run/v1",
                self.subdomain, self.region
            )
        })
    }

    /// URL of the GraphQL endpoint.
    pub fn graphql_url(&self) -> String {
        self.graphql_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.graphql.{}.nhost.run/v1",
                self.subdomain, self.region
            )
        })
    }
}

/// Resolve the data directory.
///
/// Priority:
/// 1. `CONFAB_DATA_DIR` environment variable
/// 2. `~/.confab`
/// 3. `./.confab` as a last resort
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONFAB_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".confab");
    }

    PathBuf::from(".confab")
}

/// Load backend configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`BackendConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns
///   the default.
pub async fn load_config(data_dir: &Path) -> BackendConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return BackendConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return BackendConfig::default();
        }
    };

    match toml::from_str::<BackendConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            BackendConfig::default()
        }
    }
}
