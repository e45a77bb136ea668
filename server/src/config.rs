//! Server configuration loaded from `TODO_*` environment variables.

use serde::Deserialize;

const ENV_PREFIX: &str = "TODO";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// `TODO_DATABASE_URL`, `TODO_HOST`, `TODO_PORT` and
    /// `TODO_MAX_CONNECTIONS` override the defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit environment source.
    pub fn load(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            host: default_host(),
            port: default_port(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://todo.db?mode=rwc".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_max_connections() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ServerConfig::load(environment(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServerConfig::load(environment(&[
            ("TODO_DATABASE_URL", "sqlite::memory:"),
            ("TODO_PORT", "8080"),
            ("TODO_MAX_CONNECTIONS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let result = ServerConfig::load(environment(&[("TODO_PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
