//! API integration tests
//!
//! These run against a live server. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Generate a 13-digit ISBN unique to this test run
fn fresh_isbn() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    format!("978{:010}", nanos % 10_000_000_000)
}

async fn create_library(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/libraries", BASE_URL))
        .json(&json!({ "name": name, "dept": "Engineering" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No library ID")
}

async fn create_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "category": "Testing",
            "price": "19.99",
            "isbn": fresh_isbn()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn library_count(client: &Client, library_id: i64) -> i64 {
    let response = client
        .get(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    body["count"].as_i64().expect("No count")
}

#[tokio::test]
#[ignore]
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
async fn test_library_crud() {
    let client = Client::new();
    let library_id = create_library(&client, "CRUD Test Library").await;

    // Read back
    let response = client
        .get(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "CRUD Test Library");
    assert_eq!(body["count"], 0);
    assert_eq!(body["status"], "Active");

    // Update
    let response = client
        .put(format!("{}/libraries/{}", BASE_URL, library_id))
        .json(&json!({ "status": "Inactive" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Inactive");
    assert_eq!(body["name"], "CRUD Test Library");

    // Delete
    let response = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone
    let response = client
        .get(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_list_libraries_pagination_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/libraries?page=1&size=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["libraries"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 5);
    assert!(body["pages"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_library_validation_failure() {
    let client = Client::new();

    let response = client
        .post(format!("{}/libraries", BASE_URL))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "validation_error");
    assert!(body["errors"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_book_crud_and_isbn_lookup() {
    let client = Client::new();

    let isbn = fresh_isbn();
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "The Test Book",
            "author": "Ada Example",
            "category": "Fiction",
            "price": "12.50",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    // Lookup by ISBN
    let response = client
        .get(format!("{}/books/isbn/{}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(book_id));

    // Update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "price": "15.00" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "The Test Book");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflict() {
    let client = Client::new();

    let isbn = fresh_isbn();
    let book = json!({
        "title": "Original",
        "author": "First Author",
        "price": "10.00",
        "isbn": isbn
    });

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_invalid_isbn_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Bad ISBN",
            "author": "Nobody",
            "price": "5.00",
            "isbn": "ABC-123-DEF-456"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_mapping_lifecycle_maintains_count() {
    let client = Client::new();
    let library_id = create_library(&client, "Counting Library").await;
    let book_id = create_book(&client, "Counted Book").await;

    assert_eq!(library_count(&client, library_id).await, 0);

    // Create mapping -> count goes to 1
    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": library_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let mapping_id = body["id"].as_i64().expect("No mapping ID");
    assert_eq!(body["status"], "Active");
    assert_eq!(library_count(&client, library_id).await, 1);

    // Duplicate pair -> 409
    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": library_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Deactivate mapping -> count back to 0
    let response = client
        .put(format!("{}/library-books/{}", BASE_URL, mapping_id))
        .json(&json!({ "status": "Inactive" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(library_count(&client, library_id).await, 0);

    // Reactivate -> 1 again
    let response = client
        .put(format!("{}/library-books/{}", BASE_URL, mapping_id))
        .json(&json!({ "status": "Active" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(library_count(&client, library_id).await, 1);

    // Delete mapping -> 0
    let response = client
        .delete(format!("{}/library-books/{}", BASE_URL, mapping_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
    assert_eq!(library_count(&client, library_id).await, 0);

    // Cleanup
    let _ = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_mapping_missing_parent_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": 999999999, "book_id": 999999999 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_decrements_count() {
    let client = Client::new();
    let library_id = create_library(&client, "Cascade Library").await;
    let book_id = create_book(&client, "Cascading Book").await;

    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": library_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    assert_eq!(library_count(&client, library_id).await, 1);

    // Deleting the book cascades the mapping and adjusts the count
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
    assert_eq!(library_count(&client, library_id).await, 0);

    // Cleanup
    let _ = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_library_books_listing() {
    let client = Client::new();
    let library_id = create_library(&client, "Listing Library").await;
    let book_id = create_book(&client, "Listed Book").await;

    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": library_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Books in library
    let response = client
        .get(format!("{}/libraries/{}/books", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["library_id"].as_i64(), Some(library_id));
    assert_eq!(body["books"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(body["books"][0]["title"], "Listed Book");

    // Libraries for book
    let response = client
        .get(format!("{}/books/{}/libraries", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book_id"].as_i64(), Some(book_id));
    assert_eq!(body["libraries"][0]["name"], "Listing Library");

    // Mapping list filtered by library
    let response = client
        .get(format!("{}/library-books?lib_id={}", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"].as_i64(), Some(1));
    assert_eq!(body["mappings"][0]["book_title"], "Listed Book");

    // Cleanup (library delete cascades the mapping)
    let _ = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_recount_repairs_count() {
    let client = Client::new();
    let library_id = create_library(&client, "Recount Library").await;

    // Force a wrong count through the library update endpoint
    let response = client
        .put(format!("{}/libraries/{}", BASE_URL, library_id))
        .json(&json!({ "count": 42 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    assert_eq!(library_count(&client, library_id).await, 42);

    let response = client
        .post(format!("{}/libraries/{}/recount", BASE_URL, library_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["count"], 0);

    // Cleanup
    let _ = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_library_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/libraries/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_libraries"].is_number());
    assert!(body["active_libraries"].is_number());
    assert!(body["inactive_libraries"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_mapping_details() {
    let client = Client::new();
    let library_id = create_library(&client, "Details Library").await;
    let book_id = create_book(&client, "Details Book").await;

    let response = client
        .post(format!("{}/library-books", BASE_URL))
        .json(&json!({ "lib_id": library_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let mapping_id = body["id"].as_i64().expect("No mapping ID");

    let response = client
        .get(format!("{}/library-books/{}/details", BASE_URL, mapping_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["library"]["name"], "Details Library");
    assert_eq!(body["book"]["title"], "Details Book");

    // Cleanup
    let _ = client
        .delete(format!("{}/libraries/{}", BASE_URL, library_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}
