mod common;

use common::{admin_cookie, create_test_png, image_form, spawn_app, text_form};
use serde_json::Value;
use sqlx::SqlitePool;

async fn create_cocktail(client: &reqwest::Client, address: &str, name: &str) -> i64 {
    let created: Value = client
        .post(format!("{address}/api/admin/cocktails"))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(text_form(&[("name", name), ("description", "A drink.")]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    created["id"].as_i64().unwrap()
}

#[sqlx::test]
async fn test_reorder_assigns_list_positions(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let a = create_cocktail(&client, &app.address, "A").await;
    let b = create_cocktail(&client, &app.address, "B").await;
    let c = create_cocktail(&client, &app.address, "C").await;

    // Unknown ids are ignored.
    let response = client
        .patch(format!("{}/api/admin/cocktails/reorder", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .json(&serde_json::json!({ "ids": [c, a, b, 9999] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let list: Value = client
        .get(format!("{}/api/cocktails", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[sqlx::test]
async fn test_homie_photo_is_optional(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/admin/homies", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(text_form(&[
            ("name", "Ray"),
            ("title", "Regular"),
            ("description", "Always at the corner stool."),
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let homie: Value = response.json().await.unwrap();
    assert_eq!(homie["name"], "Ray");
    assert_eq!(homie["title"], "Regular");
    assert_eq!(homie["imagePath"], Value::Null);
    let id = homie["id"].as_i64().unwrap();

    // Attach a photo afterwards.
    let updated: Value = client
        .patch(format!("{}/api/admin/homies/{id}", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(image_form(create_test_png(), "ray.png", "image/png", &[]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(
        updated["imagePath"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/homies/")
    );
}

#[sqlx::test]
async fn test_homie_requires_name_title_description(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/admin/homies", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(text_form(&[("name", "Ray"), ("title", "Regular")]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Name, title, and description are required.");
}

#[sqlx::test]
async fn test_memorabilia_requires_photo(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/admin/memorabilia", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(text_form(&[
            ("title", "Signed jersey"),
            ("description", "From the '09 season."),
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No file provided.");

    let response = client
        .post(format!("{}/api/admin/memorabilia", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(image_form(
            create_test_png(),
            "jersey.png",
            "image/png",
            &[
                ("title", "Signed jersey"),
                ("description", "From the '09 season."),
            ],
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let item: Value = response.json().await.unwrap();
    assert_eq!(item["title"], "Signed jersey");
    assert!(
        item["imagePath"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/memorabilia/")
    );
}

#[sqlx::test]
async fn test_whats_new_crud_round_trip(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/api/admin/whats-new", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(image_form(
            create_test_png(),
            "taps.png",
            "image/png",
            &[("description", "New taps this week.")],
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], "New taps this week.");
    assert!(
        created["imagePath"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/whats-new/")
    );

    let updated: Value = client
        .patch(format!("{}/api/admin/whats-new/{id}", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(text_form(&[("description", "Taps rotated again.")]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["description"], "Taps rotated again.");
    assert_eq!(updated["imagePath"], created["imagePath"]);

    let response = client
        .delete(format!("{}/api/admin/whats-new/{id}", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let list: Value = client
        .get(format!("{}/api/whats-new", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list, Value::Array(vec![]));
}

#[sqlx::test]
async fn test_uploaded_photos_are_served_back(pool: SqlitePool) {
    let app = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/api/admin/memorabilia", app.address))
        .header(reqwest::header::COOKIE, admin_cookie())
        .multipart(image_form(
            create_test_png(),
            "photo.png",
            "image/png",
            &[("title", "Matchbook"), ("description", "Original logo.")],
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let image_path = created["imagePath"].as_str().unwrap();

    let response = client
        .get(format!("{}{image_path}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let bytes = response.bytes().await.unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "served file is JPEG");
}
