//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension. Configured
//! overrides are consulted first, then the built-in table.

use std::collections::HashMap;
use std::path::Path;

/// Fallback for unknown or missing extensions
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension -> MIME lookup with configurable overrides
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// Build a table from `extension -> mime` pairs (extensions without dot)
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        Self {
            overrides: overrides
                .iter()
                .map(|(ext, mime)| (ext.trim_start_matches('.').to_ascii_lowercase(), mime.clone()))
                .collect(),
        }
    }

    /// Content-Type for an extension, case-insensitive
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        let Some(ext) = extension.map(str::to_ascii_lowercase) else {
            return DEFAULT_CONTENT_TYPE;
        };

        self.overrides
            .get(&ext)
            .map_or_else(|| get_content_type(Some(&ext)), String::as_str)
    }

    /// Content-Type for a file path
    pub fn for_path(&self, path: &Path) -> &str {
        self.lookup(path.extension().and_then(|e| e.to_str()))
    }
}

/// Built-in Content-Type table
///
/// # Examples
/// ```
/// use rust_fileserver::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("png")), "image/png");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("csv") => "text/csv",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",

        // Audio
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",

        // Default
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MimeTable {
        let overrides: HashMap<String, String> = [
            ("cc", "text/x-c"),
            ("cpp", "text/x-c"),
            ("h", "text/x-h"),
            ("mp4", "video/mpeg"),
            (".json", "application/json"),
        ]
        .into_iter()
        .map(|(e, m)| (e.to_string(), m.to_string()))
        .collect();
        MimeTable::new(&overrides)
    }

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "application/javascript");
        assert_eq!(get_content_type(Some("jpg")), "image/jpeg");
        assert_eq!(get_content_type(Some("txt")), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(get_content_type(None), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_overrides_win_over_builtin() {
        let mime = table();
        assert_eq!(mime.lookup(Some("mp4")), "video/mpeg");
        assert_eq!(mime.lookup(Some("cpp")), "text/x-c");
        assert_eq!(mime.lookup(Some("json")), "application/json");
    }

    #[test]
    fn test_fallback_chain() {
        let mime = table();
        assert_eq!(mime.lookup(Some("png")), "image/png");
        assert_eq!(mime.lookup(Some("bin")), DEFAULT_CONTENT_TYPE);
        assert_eq!(mime.lookup(None), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mime = table();
        assert_eq!(mime.lookup(Some("CC")), "text/x-c");
        assert_eq!(mime.for_path(Path::new("www/Index.HTML")), "text/html; charset=utf-8");
        assert_eq!(mime.for_path(Path::new("www/storage/README")), DEFAULT_CONTENT_TYPE);
    }
}
