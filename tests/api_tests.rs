//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo run`, then `cargo test -- --ignored`.

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to log in and get a bearer token
async fn get_auth_token(client: &Client, login: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": login,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        response.status().is_success(),
        "Login failed for {}",
        login
    );

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// A title unlikely to collide across test runs
fn unique_title(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{} {}", prefix, nanos)
}

fn book_form(title: &str, year: i32) -> multipart::Form {
    multipart::Form::new()
        .text("title", title.to_string())
        .text("description", "A test description.")
        .text("year", year.to_string())
        .text("publisher", "Test House")
        .text("author", "Test Author")
        .text("pages", "123")
        .text("genres", "1")
}

/// Create a book as admin and return its id
async fn create_book(client: &Client, token: &str, form: multipart::Form) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse create response");
    body["id"].as_i64().expect("No book id in response")
}

async fn get_book(client: &Client, token: &str, id: i64) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send detail request");

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_and_me() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin", "admin").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_listing_rejected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_create_book_forbidden_for_non_admin() {
    let client = Client::new();

    for login in ["moderator", "reader"] {
        let token = get_auth_token(&client, login, login).await;
        let response = client
            .post(format!("{}/books", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .multipart(book_form(&unique_title("Forbidden"), 2020))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {}", login);
    }
}

#[tokio::test]
#[ignore]
async fn test_pagination_bounds() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin", "admin").await;

    let response = client
        .get(format!("{}/books?page=1", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("books not an array");
    let total = body["total"].as_i64().expect("total missing");

    assert!(books.len() <= 10);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["has_next"], total > 10);

    // Ordered by year descending
    let years: Vec<i64> = books.iter().map(|b| b["year"].as_i64().unwrap()).collect();
    let mut sorted = years.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(years, sorted);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_review_rejected() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;
    let reader = get_auth_token(&client, "reader", "reader").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Reviewed"), 2021)).await;

    let review = json!({ "rating": 4, "text": "Good read." });

    let first = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&review)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&review)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // The rejection must not have added a row
    let (status, detail) = get_book(&client, &reader, book_id).await;
    assert!(status.is_success());
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_cover_dedup_shares_one_row() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;

    // Byte-identical uploads under different titles
    let cover_bytes: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-payload-for-dedup";
    let mut ids = Vec::new();
    for n in 0..2 {
        let form = book_form(&unique_title(&format!("Covered {}", n)), 2019).part(
            "cover",
            multipart::Part::bytes(cover_bytes.to_vec())
                .file_name("dedup.png")
                .mime_str("image/png")
                .unwrap(),
        );
        ids.push(create_book(&client, &admin, form).await);
    }

    let (_, first) = get_book(&client, &admin, ids[0]).await;
    let (_, second) = get_book(&client, &admin, ids[1]).await;

    let first_cover = first["cover"]["id"].as_i64().expect("first book has no cover");
    let second_cover = second["cover"]["id"].as_i64().expect("second book has no cover");
    assert_eq!(first_cover, second_cover);
}

#[tokio::test]
#[ignore]
async fn test_edit_failure_leaves_book_unchanged() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;

    let title = unique_title("Stable");
    let book_id = create_book(&client, &admin, book_form(&title, 2018)).await;

    // Nonexistent genre id violates the foreign key inside the transaction
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": "Replaced title",
            "description": "changed",
            "year": 2018,
            "publisher": "Test House",
            "author": "Test Author",
            "pages": 123,
            "genre_ids": [999999]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap_or_default().len() > 0);

    let (status, detail) = get_book(&client, &admin, book_id).await;
    assert!(status.is_success());
    assert_eq!(detail["title"], title.as_str());
}

#[tokio::test]
#[ignore]
async fn test_edit_forbidden_for_member() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;
    let reader = get_auth_token(&client, "reader", "reader").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Locked"), 2017)).await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&json!({
            "title": "Hijacked",
            "description": "",
            "year": 2017,
            "publisher": "x",
            "author": "x",
            "pages": 1,
            "genre_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_delete_cascade() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;
    let reader = get_auth_token(&client, "reader", "reader").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Doomed"), 2016)).await;

    let review = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&json!({ "rating": 2, "text": "Soon gone." }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(review.status(), StatusCode::CREATED);

    let delete = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let (status, _) = get_book(&client, &admin, book_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let reviews = client
        .get(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(reviews.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_forbidden_for_moderator() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;
    let moderator = get_auth_token(&client, "moderator", "moderator").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Protected"), 2015)).await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", moderator))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_collections_are_owner_scoped() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;
    let reader = get_auth_token(&client, "reader", "reader").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Collected"), 2014)).await;

    let created = client
        .post(format!("{}/collections", BASE_URL))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&json!({ "name": unique_title("Favorites") }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let collection: Value = created.json().await.expect("Failed to parse response");
    let collection_id = collection["id"].as_i64().unwrap();

    // Owner adds a book; a duplicate pair is rejected
    let add = |token: String| {
        let client = client.clone();
        async move {
            client
                .post(format!("{}/collections/{}/books", BASE_URL, collection_id))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({ "book_id": book_id }))
                .send()
                .await
                .expect("Failed to send request")
        }
    };

    assert_eq!(add(reader.clone()).await.status(), StatusCode::CREATED);
    assert_eq!(add(reader.clone()).await.status(), StatusCode::CONFLICT);

    // Someone else can neither view nor add
    let foreign_view = client
        .get(format!("{}/collections/{}", BASE_URL, collection_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(foreign_view.status(), StatusCode::FORBIDDEN);
    assert_eq!(add(admin.clone()).await.status(), StatusCode::FORBIDDEN);

    // Owner sees the member book and the count
    let detail = client
        .get(format!("{}/collections/{}", BASE_URL, collection_id))
        .header("Authorization", format!("Bearer {}", reader))
        .send()
        .await
        .expect("Failed to send request");
    assert!(detail.status().is_success());
    let detail: Value = detail.json().await.expect("Failed to parse response");
    assert_eq!(detail["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_full_catalog_scenario() {
    let client = Client::new();

    // Admin logs in and adds a book with a cover and one genre
    let admin = get_auth_token(&client, "admin", "admin").await;
    let title = unique_title("Title A");
    let form = book_form(&title, 2023).part(
        "cover",
        multipart::Part::bytes(b"scenario-cover-bytes".to_vec())
            .file_name("title-a.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );
    let book_id = create_book(&client, &admin, form).await;

    // The book appears on page 1 with no reviews yet
    let listing: Value = client
        .get(format!("{}/books?page=1", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = listing["books"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .expect("New book missing from page 1")
        .clone();
    assert!(entry["average_rating"].is_null());
    assert_eq!(entry["review_count"], 0);

    // A second user posts a five-star review
    let reader = get_auth_token(&client, "reader", "reader").await;
    let review = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", reader))
        .json(&json!({ "rating": 5, "text": "Outstanding." }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(review.status(), StatusCode::CREATED);

    // The detail view reflects the review
    let (status, detail) = get_book(&client, &reader, book_id).await;
    assert!(status.is_success());
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(detail["user_review"]["rating"], 5);
    assert_eq!(detail["cover"]["file_name"], "title-a.jpg");

    // And the listing aggregates it
    let listing: Value = client
        .get(format!("{}/books?page=1", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = listing["books"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .expect("Book missing from page 1")
        .clone();
    assert_eq!(entry["review_count"], 1);
    assert_eq!(entry["average_rating"], 5.0);
}

#[tokio::test]
#[ignore]
async fn test_review_text_is_sanitized() {
    let client = Client::new();
    let admin = get_auth_token(&client, "admin", "admin").await;

    let book_id = create_book(&client, &admin, book_form(&unique_title("Sanitized"), 2013)).await;

    let response = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "rating": 3,
            "text": "nice <script>alert(1)</script><b>book</b>"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["text"], "nice book");
}
