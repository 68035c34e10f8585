//! Embedded chat widget
//!
//! In development, falls back to serving from filesystem.

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::{Component, Path as FsPath, PathBuf};

#[derive(Embed)]
#[folder = "ui/dist"]
struct Assets;

/// Serve embedded static files, with filesystem fallback for development
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');
    // The wildcard arrives percent-decoded, so `..%2F` is a real `../` here.
    if !is_confined(path) {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }
    let path = format!("assets/{path}");

    if let Some(content) = Assets::get(&path) {
        return with_mime(&path, content.data.into_owned());
    }

    let fs_path = PathBuf::from("ui/dist").join(&path);
    if let Ok(content) = std::fs::read(&fs_path) {
        return with_mime(&path, content);
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Only plain relative segments may be joined onto the asset directory.
fn is_confined(path: &str) -> bool {
    !path.is_empty()
        && FsPath::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn with_mime(path: &str, content: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        Body::from(content),
    )
        .into_response()
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.into_owned()).ok();
    }

    std::fs::read_to_string("ui/dist/index.html").ok()
}
