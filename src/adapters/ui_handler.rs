use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// The compiled UI bundle (`trunk build` output). May be absent in
/// development builds, in which case every UI path answers 404.
#[derive(RustEmbed)]
#[folder = "ui/dist"]
#[allow_missing = true]
struct Asset;

pub struct UIHandler;

impl UIHandler {
    pub async fn serve(uri: Uri) -> impl IntoResponse {
        let path = uri.path().trim_start_matches('/');

        let path = if path.is_empty() { "index.html" } else { path };

        match Asset::get(path) {
            Some(content) => asset_response(path, content.data.into_owned()),
            // Unknown paths get the app shell
            None => match Asset::get("index.html") {
                Some(content) => asset_response("index.html", content.data.into_owned()),
                None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
            },
        }
    }

    /// Whether a UI bundle was embedded at build time
    pub fn is_bundled() -> bool {
        Asset::get("index.html").is_some()
    }
}

fn asset_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], data).into_response()
}
