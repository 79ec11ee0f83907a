// Configuration module entry point
// Loads configuration from file and environment, and builds the shared application state

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

/// Environment variable prefix, e.g. `FILESERVER_SERVER__PORT=8080`
const ENV_PREFIX: &str = "FILESERVER";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Missing file is not an error; every key has a default
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve `server.host:server.port`, taking the first address a name resolves to
    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let target = (self.server.host.as_str(), self.server.port);
        target
            .to_socket_addrs()
            .map_err(|e| {
                ServerError::Configuration(format!(
                    "Invalid address '{}:{}': {e}",
                    self.server.host, self.server.port
                ))
            })?
            .next()
            .ok_or_else(|| {
                ServerError::Configuration(format!(
                    "Address '{}:{}' did not resolve",
                    self.server.host, self.server.port
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 1234);
        assert_eq!(cfg.site.index_page, "fileindex.html");
        assert_eq!(cfg.mime.get("avi").map(String::as_str), Some("video/x-msvideo"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.toml");
        fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8088

[site]
web_root = "/srv/www"

[logging]
dump_exchanges = true
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.site.web_root, PathBuf::from("/srv/www"));
        // Untouched keys keep their defaults
        assert_eq!(cfg.site.storage_dir, "storage");
        assert!(cfg.logging.dump_exchanges);
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_mime_table_extends_default_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.toml");
        fs::write(
            &path,
            r#"
[mime]
md = "text/markdown"
mp4 = "video/mp4"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.mime.len(), 9);
        assert_eq!(cfg.mime.get("md").map(String::as_str), Some("text/markdown"));
        assert_eq!(cfg.mime.get("mp4").map(String::as_str), Some("video/mp4"));
        assert_eq!(cfg.mime.get("cpp").map(String::as_str), Some("text/x-c"));
    }

    #[test]
    fn test_socket_addr_from_ip() {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 4321;
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:4321".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_socket_addr_resolves_localhost() {
        let cfg = Config::default();
        let addr = cfg.get_socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 1234);
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host name".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::Configuration(_))
        ));
    }
}
