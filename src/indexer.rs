//! Storage index generation
//!
//! Lists the regular files of the storage directory as download links in a
//! static HTML page. Runs once at startup, before the listener accepts
//! connections, and always rewrites the whole page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::ServerError;

/// Written ahead of the document so legacy consumers detect UTF-8
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes that cannot appear literally in a relative URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub output: PathBuf,
    pub entries: usize,
}

/// Regenerate `<web_root>/<pages_dir>/<index_page>` from `<web_root>/<storage_dir>`
///
/// Nothing is written when the web root or storage directory is missing.
/// The pages directory is created if needed.
pub fn generate_index(site: &SiteConfig) -> Result<IndexSummary, ServerError> {
    require_dir(&site.web_root)?;
    let storage = site.storage_path();
    require_dir(&storage)?;

    let pages = site.pages_path();
    fs::create_dir_all(&pages).map_err(|e| ServerError::io(&pages, e))?;

    let names = list_regular_files(&storage)?;
    let html = render_index(&site.storage_dir, &names);

    let mut document = Vec::with_capacity(UTF8_BOM.len() + html.len());
    document.extend_from_slice(UTF8_BOM);
    document.extend_from_slice(html.as_bytes());

    let output = site.index_page_path();
    fs::write(&output, document).map_err(|e| ServerError::io(&output, e))?;

    Ok(IndexSummary {
        output,
        entries: names.len(),
    })
}

/// Names of the regular files directly inside `dir`, sorted
///
/// Subdirectories and symlinks are skipped.
pub fn list_regular_files(dir: &Path) -> Result<Vec<String>, ServerError> {
    let entries = fs::read_dir(dir).map_err(|e| ServerError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ServerError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ServerError::io(entry.path(), e))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Render the index document (without BOM)
///
/// Link text is the file name as is; the `href` segment is percent-encoded
/// so names containing `#`, `?` or `%` still download.
pub fn render_index(storage_dir: &str, names: &[String]) -> String {
    let title = encode_text(storage_dir);
    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n  \
         <meta charset=\"UTF-8\">\n  \
         <title>Files in '{title}' Directory</title>\n\
         </head>\n\
         <body>\n\
         <h1>Files in '{title}' Directory</h1>\n\
         <ul>\n"
    );

    let dir = href_segment(storage_dir);
    for name in names {
        html.push_str(&format!(
            "  <li><a href=\"../../{dir}/{}\" download>{}</a></li>\n",
            href_segment(name),
            encode_text(name),
        ));
    }

    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Percent-encode one path segment, then escape it for a double-quoted attribute
fn href_segment(segment: &str) -> String {
    let encoded = utf8_percent_encode(segment, SEGMENT).to_string();
    encode_double_quoted_attribute(&encoded).into_owned()
}

fn require_dir(path: &Path) -> Result<(), ServerError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ServerError::Configuration(format!(
            "Directory '{}' does not exist or is not a directory",
            path.display()
        )))
    }
}
