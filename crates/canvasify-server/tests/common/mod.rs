#![allow(dead_code)]

use std::io::Cursor;

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tower::ServiceExt;

use canvasify_server::config::ServerConfig;
use canvasify_server::router::build_app_router;
use canvasify_server::state::AppState;

pub const BOUNDARY: &str = "canvasify-test-boundary";

/// Build a test `ServerConfig` with production defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router with the given configuration.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack (request ID, tracing, timeout, upload ceiling).
pub fn build_test_app(config: ServerConfig) -> Router {
    build_app_router(AppState::new(config))
}

/// Hand-rolled `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file part.
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a plain text part.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    /// Close the body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// Content type header value matching [`BOUNDARY`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// POST a multipart body to `/format` with an accurate `Content-Length`.
pub async fn post_format(app: Router, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/format")
        .header(CONTENT_TYPE, multipart_content_type())
        .header(CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Open a ZIP archive held in memory.
pub fn open_zip(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
}

/// Read one entry out of an archive.
pub fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    use std::io::Read;

    let mut bytes = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

/// Sorted entry names of an archive.
pub fn entry_names(archive: &zip::ZipArchive<Cursor<Vec<u8>>>) -> Vec<String> {
    let mut names: Vec<String> = archive.file_names().map(str::to_owned).collect();
    names.sort();
    names
}

/// A solid-color JPEG.
pub fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 110, 190]));
    encode_fixture(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// A solid-color opaque PNG.
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    encode_fixture(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// A PNG that is transparent except for an opaque black center square
/// spanning the middle 60% of each axis.
pub fn transparent_png_fixture(size: u32) -> Vec<u8> {
    let lo = size / 5;
    let hi = size - lo;
    let img = RgbaImage::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    encode_fixture(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

fn encode_fixture(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}
