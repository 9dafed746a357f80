//! Embedded static assets served under `/assets/`.
//!
//! The stylesheet and icons are compiled into the binary from `assets/`, so
//! the server ships as one executable. Responses carry the content hash as
//! an `ETag` and answer revalidation with 304.

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::{Embed, EmbeddedFile};

/// Files embedded from `assets/`.
#[derive(Embed)]
#[folder = "assets"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.ico"]
#[include = "*.png"]
#[include = "*.woff2"]
pub struct StaticAssets;

/// GET /assets/{*path}
pub async fn serve_asset(Path(path): Path<String>, headers: HeaderMap) -> Response {
    let path = path.trim_start_matches('/');
    if path.split('/').any(|part| part == "..") {
        return not_found();
    }
    let Some(file) = StaticAssets::get(path) else {
        return not_found();
    };

    let etag = etag_of(&file);
    let revalidated = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|tag| tag.trim() == etag));
    if revalidated {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, cache_control_for_path(path).to_string()),
            (header::ETAG, etag),
        ],
        file.data.into_owned(),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

fn etag_of(file: &EmbeddedFile) -> String {
    let hash: String = file
        .metadata
        .sha256_hash()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("\"{hash}\"")
}

/// Returns the Cache-Control header for an asset.
///
/// Fonts and raster images rarely change and are cached for a week; the
/// stylesheet and SVG icons for an hour.
pub fn cache_control_for_path(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "woff2" | "png" | "ico" => "public, max-age=604800",
        _ => "public, max-age=3600",
    }
}
