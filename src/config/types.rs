// Configuration types module
// Defines all configuration-related data structures and their defaults

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// Extension (without dot) -> MIME type, consulted before the built-in table.
    /// A configured `[mime]` table is layered over the default overrides.
    #[serde(deserialize_with = "merge_mime_overrides")]
    pub mime: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            logging: LoggingConfig::default(),
            performance: PerformanceConfig::default(),
            http: HttpConfig::default(),
            mime: default_mime_overrides(),
        }
    }
}

/// Listening address and runtime sizing
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1234,
            workers: None,
        }
    }
}

/// Web root layout
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory served at `mount_point`
    pub web_root: PathBuf,
    /// URL prefix the web root is mounted at
    pub mount_point: String,
    /// Subdirectory of the web root listed by the index page
    pub storage_dir: String,
    /// Subdirectory of the web root receiving the generated page
    pub pages_dir: String,
    /// File name of the generated page
    pub index_page: String,
    /// Files tried when a directory is requested
    pub index_files: Vec<String>,
    /// Regenerate the index page at startup
    pub generate_index: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            web_root: PathBuf::from("./www"),
            mount_point: "/".to_string(),
            storage_dir: "storage".to_string(),
            pages_dir: "pages".to_string(),
            index_page: "fileindex.html".to_string(),
            index_files: vec!["index.html".to_string()],
            generate_index: true,
        }
    }
}

impl SiteConfig {
    pub fn storage_path(&self) -> PathBuf {
        self.web_root.join(&self.storage_dir)
    }

    pub fn pages_path(&self) -> PathBuf {
        self.web_root.join(&self.pages_dir)
    }

    /// Location of the generated index page
    pub fn index_page_path(&self) -> PathBuf {
        self.pages_path().join(&self.index_page)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    pub show_headers: bool,
    /// Write the full request/response exchange for every request
    pub dump_exchanges: bool,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: "combined".to_string(),
            show_headers: false,
            dump_exchanges: false,
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration (all durations in seconds)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// How long a stop waits for open connections to finish
    pub shutdown_timeout: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
            shutdown_timeout: 5,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: "rust-fileserver".to_string(),
            max_body_size: 10_485_760, // 10MB
        }
    }
}

fn merge_mime_overrides<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let configured = HashMap::<String, String>::deserialize(deserializer)?;
    let mut merged = default_mime_overrides();
    merged.extend(configured);
    Ok(merged)
}

fn default_mime_overrides() -> HashMap<String, String> {
    [
        ("cc", "text/x-c"),
        ("cpp", "text/x-c"),
        ("hh", "text/x-h"),
        ("h", "text/x-h"),
        ("mp3", "audio/mpeg"),
        ("mp4", "video/mpeg"),
        ("avi", "video/x-msvideo"),
        ("json", "application/json"),
    ]
    .into_iter()
    .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
    .collect()
}
