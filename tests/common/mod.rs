#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Once};

use guffs::db::{LocalDb, migrations};
use guffs::storage::LocalStorage;
use reqwest::multipart;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const ADMIN_PASSWORD: &str = "test-password";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("guffs=debug")
            .with_test_writer()
            .init();
    });
}

/// A running application instance bound to a random local port.
///
/// The uploads directory is a tempdir owned by this struct; dropping the
/// struct removes everything the test stored.
pub struct TestApp {
    pub address: String,
    pub uploads_dir: TempDir,
}

/// Spawns the application over the given test pool and a tempdir storage
/// backend, with the admin password set to [`ADMIN_PASSWORD`].
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(pool: SqlitePool) -> TestApp {
    dotenvy::from_filename_override("tests/data/.test.env").unwrap();
    init_tracing_once();

    let db = Arc::new(LocalDb::from_pool(pool));
    migrations::run(db.as_ref())
        .await
        .expect("Failed to run migrations");

    let uploads_dir = TempDir::new().expect("Failed to create tempdir");
    let storage = Arc::new(LocalStorage::new(uploads_dir.path().to_path_buf()));

    let app = guffs::app_with_backends(
        db,
        storage,
        Some(ADMIN_PASSWORD.to_string()),
        uploads_dir.path().to_path_buf(),
    );

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    TestApp {
        address,
        uploads_dir,
    }
}

/// The Cookie header value the admin middleware accepts in tests.
pub fn admin_cookie() -> String {
    format!("guffs_admin={ADMIN_PASSWORD}")
}

/// A small valid PNG generated with the `image` crate.
pub fn create_test_png() -> Vec<u8> {
    create_test_png_sized(64, 48)
}

pub fn create_test_png_sized(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 120])
    });
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf.into_inner()
}

/// A multipart form carrying `file` plus any extra text fields.
pub fn image_form(
    data: Vec<u8>,
    filename: &str,
    content_type: &str,
    fields: &[(&str, &str)],
) -> multipart::Form {
    let mut form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .unwrap(),
    );
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    form
}

/// A multipart form with only text fields, no file part.
pub fn text_form(fields: &[(&str, &str)]) -> multipart::Form {
    let mut form = multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    form
}
