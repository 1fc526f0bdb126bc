//! HTML directory index for the plain file server.
//!
//! Directories holding an `index.html` are left to `ServeDir`; every other
//! directory gets a generated listing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};

/// Middleware answering directory requests with a listing.
pub async fn directory_listing(
    State(root): State<Arc<PathBuf>>,
    request: Request,
    next: Next,
) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let url_path = request.uri().path().to_string();
    let Some(dir) = resolve_dir(&root, &url_path).await else {
        return next.run(request).await;
    };
    if tokio::fs::metadata(dir.join("index.html")).await.is_ok() {
        return next.run(request).await;
    }
    if !url_path.ends_with('/') {
        return Redirect::permanent(&format!("{url_path}/")).into_response();
    }

    match render_listing(&dir, &url_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to list directory");
            next.run(request).await
        }
    }
}

/// Directory under `root` addressed by `url_path`, if there is one.
///
/// Paths with `..` or backslash segments are never resolved.
async fn resolve_dir(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    let mut dir = root.to_path_buf();
    for segment in decoded.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        dir.push(segment);
    }

    let meta = tokio::fs::metadata(&dir).await.ok()?;
    meta.is_dir().then_some(dir)
}

/// Listing page for `dir`; subdirectories get a trailing `/`.
pub async fn render_listing(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_by_key(|name| name.to_lowercase());

    let title = format!("Directory listing for {}", escape_html(url_path));
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for name in &names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            urlencoding::encode(name).replace("%2F", "/"),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_marks_directories_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("A.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        let a = html.find(">A.txt<").unwrap();
        let b = html.find(">b.txt<").unwrap();
        assert!(a < b);
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
        assert!(html.contains("<title>Directory listing for /</title>"));
    }

    #[tokio::test]
    async fn test_listing_escapes_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a&b <x>.txt"), b"x").unwrap();

        let html = render_listing(dir.path(), "/").await.unwrap();
        assert!(html.contains(">a&amp;b &lt;x&gt;.txt<"));
        assert!(html.contains("href=\"a%26b%20%3Cx%3E.txt\""));
    }

    #[tokio::test]
    async fn test_resolve_rejects_parent_segments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        assert!(resolve_dir(dir.path(), "/sub/").await.is_some());
        assert!(resolve_dir(dir.path(), "/sub/../..").await.is_none());
        assert!(resolve_dir(dir.path(), "/%2e%2e/").await.is_none());
        assert!(resolve_dir(dir.path(), "/missing/").await.is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
