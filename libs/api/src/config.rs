use repository::DatabaseConfig;
use serde::Deserialize;
use storage::S3Config;

/// `Config.toml`
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub storage: S3Config,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CorsConfig {
    /// `"*"` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// `Secrets.toml`, never checked in.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Secrets {
    pub database_url: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub acceptable_api_key: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_config() {
        // Arrange
        let text = r#"
            [cors]
            allowed_origins = ["http://localhost:5173"]

            [storage]
            bucket = "images"
            public_url = "https://images.example.com"
        "#;

        // Act
        let config = toml::from_str::<Config>(text);

        // Assert
        let config = config.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.storage.region, "auto");
        assert!(config.storage.endpoint_url.is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let text = r#"
            DATABASE_URL = "postgres://localhost/backstage"
            ACCEPTABLE_API_KEY = "key"
        "#;

        let secrets = toml::from_str::<Secrets>(text).unwrap();

        assert_eq!(secrets.database_url, "postgres://localhost/backstage");
        assert_eq!(secrets.acceptable_api_key.as_deref(), Some("key"));
        assert!(secrets.aws_access_key_id.is_none());
    }
}
