//! Static file serving module
//!
//! Maps request paths under the mount point onto the web root, rejects
//! anything that would leave it, and loads the file with its MIME type.

use crate::config::AppState;
use crate::error::ServerError;
use crate::http::{self, HttpResponse};
use crate::logger;
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve a request path from the static mount
pub async fn serve_mount(state: &AppState, path: &str) -> HttpResponse {
    match load_from_mount(state, path).await {
        Ok((content, content_type)) => http::build_ok_response(content, content_type),
        Err(e) => error_response(path, &e),
    }
}

/// Serve one specific file with a fixed Content-Type
pub async fn serve_file(file_path: &Path, content_type: &str) -> HttpResponse {
    match fs::read(file_path).await {
        Ok(content) => http::build_ok_response(content, content_type),
        Err(e) => error_response(&file_path.display().to_string(), &read_error(file_path, e)),
    }
}

/// Load a mounted file, trying index files for directories
pub async fn load_from_mount<'a>(
    state: &'a AppState,
    path: &str,
) -> Result<(Vec<u8>, &'a str), ServerError> {
    let site = &state.config.site;
    let mut file_path = resolve_static_path(&site.web_root, &site.mount_point, path)?;

    let root = site.web_root.canonicalize().map_err(|e| {
        logger::log_warning(&format!(
            "Web root not found or inaccessible '{}': {e}",
            site.web_root.display()
        ));
        ServerError::NotFound(path.to_string())
    })?;

    if file_path.is_dir() {
        file_path = site
            .index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ServerError::NotFound(path.to_string()))?;
    }

    let canonical = file_path
        .canonicalize()
        .map_err(|e| read_error(&file_path, e))?;
    if !canonical.starts_with(&root) {
        return Err(ServerError::PathTraversalRejected(format!(
            "{path} -> {}",
            canonical.display()
        )));
    }

    let metadata = fs::metadata(&canonical)
        .await
        .map_err(|e| read_error(&canonical, e))?;
    if !metadata.is_file() {
        return Err(ServerError::NotFound(path.to_string()));
    }

    let content = fs::read(&canonical)
        .await
        .map_err(|e| read_error(&canonical, e))?;

    Ok((content, state.mime.for_path(&file_path)))
}

/// Resolve a request path to a location under `root`
///
/// The mount prefix is stripped and the rest percent-decoded, then normalized
/// lexically: `.` is dropped and `..` removes the previous segment. Climbing
/// above the root, NUL bytes and drive prefixes are rejected. Symlinks are
/// not followed here; [`load_from_mount`] checks the canonical target.
pub fn resolve_static_path(
    root: &Path,
    mount_point: &str,
    request_path: &str,
) -> Result<PathBuf, ServerError> {
    let mount = mount_point.trim_end_matches('/');
    let relative = request_path
        .strip_prefix(mount)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .ok_or_else(|| ServerError::NotFound(request_path.to_string()))?;

    let decoded = percent_decode_str(relative)
        .decode_utf8()
        .map_err(|_| ServerError::NotFound(request_path.to_string()))?;
    if decoded.contains('\0') {
        return Err(ServerError::PathTraversalRejected(request_path.to_string()));
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => normalized.push(segment),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(ServerError::PathTraversalRejected(request_path.to_string()));
                }
            }
            Component::Prefix(_) => {
                return Err(ServerError::PathTraversalRejected(request_path.to_string()));
            }
        }
    }

    Ok(root.join(normalized))
}

/// Missing files are a plain 404, anything else is an I/O failure
fn read_error(path: &Path, e: io::Error) -> ServerError {
    if e.kind() == io::ErrorKind::NotFound {
        ServerError::NotFound(path.display().to_string())
    } else {
        ServerError::io(path, e)
    }
}

fn error_response(path: &str, error: &ServerError) -> HttpResponse {
    match error {
        // File not found is common, no need to log above debug
        ServerError::NotFound(_) => logger::log_debug(&format!("Not found: {path}")),
        ServerError::PathTraversalRejected(detail) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {detail}"));
        }
        other => logger::log_error(&format!("Failed to serve '{path}': {other}")),
    }
    http::build_error_response(error.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use hyper::header::CONTENT_TYPE;
    use hyper::StatusCode;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn state_for(root: &Path, mount_point: &str) -> AppState {
        let mut config = Config::default();
        config.site.web_root = root.to_path_buf();
        config.site.mount_point = mount_point.to_string();
        AppState::new(config).unwrap()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let www = dir.path().join("www");
        std_fs::create_dir_all(www.join("storage")).unwrap();
        std_fs::create_dir_all(www.join("empty")).unwrap();
        std_fs::write(www.join("index.html"), "<h1>home</h1>").unwrap();
        std_fs::write(www.join("storage/notes.txt"), "notes").unwrap();
        std_fs::write(www.join("storage/song.MP3"), [0xff_u8, 0xfb]).unwrap();
        std_fs::write(dir.path().join("secret.txt"), "secret").unwrap();
        dir
    }

    #[test]
    fn test_resolve_plain_path() {
        let root = Path::new("/srv/www");
        assert_eq!(
            resolve_static_path(root, "/", "/storage/a.txt").unwrap(),
            PathBuf::from("/srv/www/storage/a.txt")
        );
        assert_eq!(resolve_static_path(root, "/", "/").unwrap(), PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_resolve_normalizes_dots() {
        let root = Path::new("/srv/www");
        assert_eq!(
            resolve_static_path(root, "/", "/storage/./x/../a.txt").unwrap(),
            PathBuf::from("/srv/www/storage/a.txt")
        );
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = Path::new("/srv/www");
        for path in ["/../etc/passwd", "/storage/../../etc/passwd", "/%2e%2e/secret.txt", "/a%00b"] {
            assert!(
                matches!(
                    resolve_static_path(root, "/", path),
                    Err(ServerError::PathTraversalRejected(_))
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_decodes_and_strips_mount() {
        let root = Path::new("/srv/www");
        assert_eq!(
            resolve_static_path(root, "/files/", "/files/my%20file.txt").unwrap(),
            PathBuf::from("/srv/www/my file.txt")
        );
        assert!(matches!(
            resolve_static_path(root, "/files", "/filesystem/a.txt"),
            Err(ServerError::NotFound(_))
        ));
        assert!(matches!(
            resolve_static_path(root, "/", "/%ff%fe"),
            Err(ServerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_serve_file_with_override_mime() {
        let dir = fixture();
        let state = state_for(&dir.path().join("www"), "/");

        let response = serve_mount(&state, "/storage/song.MP3").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "audio/mpeg");
        assert_eq!(response.body().as_ref(), &[0xff_u8, 0xfb]);

        let response = serve_mount(&state, "/storage/notes.txt").await;
        assert_eq!(response.body().as_ref(), b"notes");
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_directory_uses_index_file() {
        let dir = fixture();
        let state = state_for(&dir.path().join("www"), "/");

        let response = serve_mount(&state, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"<h1>home</h1>");

        let response = serve_mount(&state, "/empty/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_and_traversal_are_404() {
        let dir = fixture();
        let state = state_for(&dir.path().join("www"), "/");

        for path in ["/storage/missing.txt", "/../secret.txt", "/%2e%2e/secret.txt"] {
            let response = serve_mount(&state, path).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
            assert_ne!(response.body().as_ref(), b"secret");
        }
    }

    #[tokio::test]
    async fn test_missing_web_root_is_404() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir.path().join("nowhere"), "/");
        assert_eq!(
            serve_mount(&state, "/index.html").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_rejected() {
        let dir = fixture();
        let www = dir.path().join("www");
        std::os::unix::fs::symlink(dir.path().join("secret.txt"), www.join("leak.txt")).unwrap();
        let state = state_for(&www, "/");

        let err = load_from_mount(&state, "/leak.txt").await.unwrap_err();
        assert!(matches!(err, ServerError::PathTraversalRejected(_)));
    }

    #[tokio::test]
    async fn test_serve_file_missing_is_404() {
        let dir = TempDir::new().unwrap();
        let response = serve_file(&dir.path().join("absent.html"), "text/html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        std_fs::write(dir.path().join("page.html"), "<p>x</p>").unwrap();
        let response = serve_file(&dir.path().join("page.html"), "text/html").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    }
}
