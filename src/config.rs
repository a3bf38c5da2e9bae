use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub watchmode: WatchmodeConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchmodeConfig {
    #[serde(alias = "baseurl", default = "default_base_url")]
    pub base_url: String,
    /// Takes precedence over the environment variable named by `api_key_env`.
    #[serde(alias = "apikey", default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_listing_limit")]
    pub listing_limit: u32,
    #[serde(default = "default_listing_types")]
    pub listing_types: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for WatchmodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            user_agent: default_user_agent(),
            listing_limit: default_listing_limit(),
            listing_types: default_listing_types(),
            timeout_secs: None,
        }
    }
}

impl WatchmodeConfig {
    /// The configured key, falling back to the environment. Empty values
    /// count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Send page searches to a remote `/api/search` instead of calling the
    /// provider in-process.
    #[serde(alias = "proxyurl", default)]
    pub proxy_url: Option<String>,
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_base_url() -> String {
    "https://api.watchmode.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "WATCHMODE_API_KEY".to_string()
}

fn default_user_agent() -> String {
    "MovieFinder/1.0".to_string()
}

fn default_listing_limit() -> u32 {
    6
}

fn default_listing_types() -> String {
    "movie".to_string()
}

fn default_cookie_name() -> String {
    "moviefinder_session".to_string()
}

fn default_idle_timeout() -> u64 {
    86400
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.listen.port, "3000");
        assert_eq!(config.watchmode.base_url, "https://api.watchmode.com/v1");
        assert_eq!(config.watchmode.api_key_env, "WATCHMODE_API_KEY");
        assert_eq!(config.watchmode.listing_limit, 6);
        assert_eq!(config.watchmode.listing_types, "movie");
        assert_eq!(config.session.cookie_name, "moviefinder_session");
        assert_eq!(config.search.proxy_url, None);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "8080"
watchmode:
  baseurl: http://localhost:9999/v1
  apikey: abc123
  listing_limit: 12
  timeout_secs: 5
session:
  idle_timeout_secs: 60
search:
  proxy_url: http://api.local/api/search
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.watchmode.base_url, "http://localhost:9999/v1");
        assert_eq!(config.watchmode.resolve_api_key().as_deref(), Some("abc123"));
        assert_eq!(config.watchmode.listing_limit, 12);
        assert_eq!(config.watchmode.timeout_secs, Some(5));
        assert_eq!(config.session.idle_timeout_secs, 60);
        assert_eq!(config.search.proxy_url.as_deref(), Some("http://api.local/api/search"));
        assert_eq!(config.session.cookie_name, "moviefinder_session");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = WatchmodeConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "MOVIEFINDER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
