//! Integration tests for `POST /format`.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, entry_names, jpeg_fixture, open_zip, png_fixture,
    post_format, read_entry, test_config, transparent_png_fixture, MultipartBody,
};
use image::{GenericImageView, ImageFormat};

use canvasify_server::config::ServerConfig;

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Config with a small canvas so the tests stay fast.
fn small_canvas_config() -> ServerConfig {
    ServerConfig {
        canvas_size: 100,
        ..test_config()
    }
}

// ---------------------------------------------------------------------------
// Test: 2000x1000 JPEG in Fill mode becomes a 1000x1000 JPEG entry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fill_jpeg_scenario() {
    let app = build_test_app(test_config());
    let body = MultipartBody::new()
        .file("images", "landscape.jpg", "image/jpeg", &jpeg_fixture(2000, 1000))
        .text("fill_mode", "Fill")
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"formatted_images.zip\""
    );

    let mut archive = open_zip(body_bytes(response).await);
    assert_eq!(entry_names(&archive), vec!["landscape_formatted.jpg"]);

    let entry = read_entry(&mut archive, "landscape_formatted.jpg");
    assert_eq!(image::guess_format(&entry).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&entry).unwrap();
    assert_eq!(decoded.dimensions(), (1000, 1000));
    assert!(!decoded.color().has_alpha());
}

// ---------------------------------------------------------------------------
// Test: 500x500 transparent PNG in Fit mode gets symmetric white borders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fit_transparent_png_scenario() {
    let app = build_test_app(test_config());
    let body = MultipartBody::new()
        .file("images", "badge.png", "image/png", &transparent_png_fixture(500))
        .text("fill_mode", "Fit")
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut archive = open_zip(body_bytes(response).await);
    let entry = read_entry(&mut archive, "badge_formatted.png");
    assert_eq!(image::guess_format(&entry).unwrap(), ImageFormat::Png);

    let decoded = image::load_from_memory(&entry).unwrap();
    assert_eq!(decoded.dimensions(), (1000, 1000));
    assert!(!decoded.color().has_alpha());

    // The 500x500 source sits at (250, 250); everything outside is white
    for (x, y) in [(0, 0), (999, 999), (100, 500), (899, 500), (500, 100), (500, 899)] {
        assert_eq!(decoded.get_pixel(x, y).0, WHITE, "border at ({x}, {y})");
    }
    // The transparent ring of the source also shows the background
    assert_eq!(decoded.get_pixel(260, 260).0, WHITE);
    // The opaque center is drawn
    assert_eq!(decoded.get_pixel(500, 500).0, [0, 0, 0, 255]);
}

// ---------------------------------------------------------------------------
// Test: a non-image in the middle of a batch is silently dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_file_in_batch_is_skipped() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "first.jpg", "image/jpeg", &jpeg_fixture(64, 48))
        .file("images", "notes.txt", "text/plain", b"just some text")
        .file("images", "third.png", "image/png", &png_fixture(48, 64))
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let archive = open_zip(body_bytes(response).await);
    assert_eq!(
        entry_names(&archive),
        vec!["first_formatted.jpg", "third_formatted.png"]
    );
}

// ---------------------------------------------------------------------------
// Test: an `images` field with no selected file yields an empty archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_images_field_returns_empty_archive() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "", "application/octet-stream", b"")
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/zip");

    let archive = open_zip(body_bytes(response).await);
    assert_eq!(archive.len(), 0);
}

// ---------------------------------------------------------------------------
// Test: all uploads failing is still a successful, empty archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_invalid_uploads_return_empty_archive() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "a.jpg", "image/jpeg", b"not a jpeg")
        .file("images", "b.png", "image/png", &[0x89, b'P', b'N', b'G'])
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(open_zip(body_bytes(response).await).len(), 0);
}

// ---------------------------------------------------------------------------
// Test: missing fill_mode defaults to Fill (no white padding)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fill_mode_defaults_to_fill() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "wide.png", "image/png", &png_fixture(300, 100))
        .finish();

    let response = post_format(app, body).await;
    let mut archive = open_zip(body_bytes(response).await);
    let decoded = image::load_from_memory(&read_entry(&mut archive, "wide_formatted.png")).unwrap();

    assert_eq!(decoded.dimensions(), (100, 100));
    assert_ne!(decoded.get_pixel(0, 0).0, WHITE);
    assert_ne!(decoded.get_pixel(50, 0).0, WHITE);
}

// ---------------------------------------------------------------------------
// Test: any fill_mode other than "Fill" means Fit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_fill_mode_means_fit() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .text("fill_mode", "stretch")
        .file("images", "wide.png", "image/png", &png_fixture(300, 100))
        .finish();

    let response = post_format(app, body).await;
    let mut archive = open_zip(body_bytes(response).await);
    let decoded = image::load_from_memory(&read_entry(&mut archive, "wide_formatted.png")).unwrap();

    assert_eq!(decoded.dimensions(), (100, 100));
    // 92x31 band centered vertically: top and bottom rows are padding
    assert_eq!(decoded.get_pixel(50, 0).0, WHITE);
    assert_eq!(decoded.get_pixel(50, 99).0, WHITE);
    assert_ne!(decoded.get_pixel(50, 50).0, WHITE);
}

// ---------------------------------------------------------------------------
// Test: repeated fill_mode fields use the first value
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_fill_mode_value_wins() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .text("fill_mode", "Fit")
        .text("fill_mode", "Fill")
        .file("images", "wide.png", "image/png", &png_fixture(300, 100))
        .finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut archive = open_zip(body_bytes(response).await);
    let decoded = image::load_from_memory(&read_entry(&mut archive, "wide_formatted.png")).unwrap();

    // Fit padding means the first value was honored
    assert_eq!(decoded.get_pixel(50, 0).0, WHITE);
    assert_ne!(decoded.get_pixel(50, 50).0, WHITE);
}

// ---------------------------------------------------------------------------
// Test: directory components in upload names are dropped from entries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_paths_are_reduced_to_basenames() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "../../etc/cron.d/x.png", "image/png", &png_fixture(20, 20))
        .finish();

    let response = post_format(app, body).await;
    let archive = open_zip(body_bytes(response).await);

    assert_eq!(entry_names(&archive), vec!["x_formatted.png"]);
}

// ---------------------------------------------------------------------------
// Test: uploads without an extension get a .jpg entry holding JPEG bytes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_extension_is_packaged_as_jpeg() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "scan", "application/octet-stream", &png_fixture(40, 40))
        .finish();

    let response = post_format(app, body).await;
    let mut archive = open_zip(body_bytes(response).await);
    let entry = read_entry(&mut archive, "scan_formatted.jpg");

    assert_eq!(image::guess_format(&entry).unwrap(), ImageFormat::Jpeg);
}

// ---------------------------------------------------------------------------
// Test: colliding derived names are disambiguated, not dropped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn colliding_names_are_suffixed() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "photo.jpg", "image/jpeg", &jpeg_fixture(32, 32))
        .file("images", "photo.JPG", "image/jpeg", &jpeg_fixture(32, 32))
        .finish();

    let response = post_format(app, body).await;
    let archive = open_zip(body_bytes(response).await);

    assert_eq!(
        entry_names(&archive),
        vec!["photo_formatted.jpg", "photo_formatted_2.jpg"]
    );
}

// ---------------------------------------------------------------------------
// Test: configured canvas size drives the output dimensions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn canvas_size_follows_config() {
    let app = build_test_app(ServerConfig {
        canvas_size: 64,
        ..test_config()
    });
    let body = MultipartBody::new()
        .file("images", "p.png", "image/png", &png_fixture(10, 30))
        .finish();

    let response = post_format(app, body).await;
    let mut archive = open_zip(body_bytes(response).await);
    let decoded = image::load_from_memory(&read_entry(&mut archive, "p_formatted.png")).unwrap();

    assert_eq!(decoded.dimensions(), (64, 64));
}

// ---------------------------------------------------------------------------
// Test: response carries an x-request-id header
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new()
        .file("images", "a.png", "image/png", &png_fixture(8, 8))
        .finish();

    let response = post_format(app, body).await;
    assert!(
        response.headers().get("x-request-id").is_some(),
        "Response must contain an x-request-id header"
    );
}

// ---------------------------------------------------------------------------
// Test: missing `images` field is a 400 with a JSON error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_images_field_returns_400() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new().text("fill_mode", "Fill").finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No images uploaded");
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: an `images` part without a filename is a form value, not a file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn images_text_part_does_not_count_as_file() {
    let app = build_test_app(small_canvas_config());
    let body = MultipartBody::new().text("images", "oops").finish();

    let response = post_format(app, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
