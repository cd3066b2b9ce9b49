use serde_json::{json, Value};

use crate::helpers::TestApp;

const EPOCH: &str = "1970-01-01T00:00:00Z";
// 1000 seconds after the epoch
const CONFIRMED: &str = "1970-01-01T00:16:40Z";

#[tokio::test]
async fn create_returns_the_new_entry() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_create_email("a@x.com").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Email"], "a@x.com");
    assert_eq!(body["ConfirmedAt"], EPOCH);
    assert_eq!(body["OptOut"], false);
    assert!(body["Id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_returns_400_for_a_duplicate_email() {
    let test_app = TestApp::spawn_app().await;
    test_app.post_create_email("a@x.com").await;

    let response = test_app.post_create_email("a@x.com").await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert!(body["Err"].as_str().unwrap().contains("a@x.com"));
    assert_eq!(test_app.count_rows("a@x.com").await, 1);
}

#[tokio::test]
async fn get_returns_an_empty_object_for_an_unknown_email() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_get_email("nobody@x.com").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn undecodable_body_is_treated_as_empty() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .http_client
        .post(format!("{}/email/get", test_app.json_address))
        .body("this is not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn create_keeps_the_email_when_another_field_is_mistyped() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_json("/email/create", json!({ "Email": "a@x.com", "Id": "7" }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Email"], "a@x.com");
    assert_eq!(test_app.count_rows("a@x.com").await, 1);
    assert_eq!(test_app.count_rows("").await, 0);
}

#[tokio::test]
async fn update_keeps_its_fields_when_the_id_is_mistyped() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .put_update_email(json!({
            "Id": "7",
            "Email": "a@x.com",
            "ConfirmedAt": CONFIRMED,
            "OptOut": false
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Email"], "a@x.com");
    assert_eq!(body["ConfirmedAt"], CONFIRMED);
    assert_eq!(test_app.count_rows("").await, 0);
}

#[tokio::test]
async fn get_batch_returns_400_when_pagination_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (json!({}), "missing page and count"),
        (json!({ "Page": 1 }), "missing count"),
        (json!({ "Count": 2 }), "missing page"),
        (json!({ "Page": 0, "Count": 2 }), "page is zero"),
        (json!({ "Page": 1, "Count": 0 }), "count is zero"),
        (json!({ "Page": -1, "Count": 2 }), "page is negative"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_get_email_batch(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload had {}",
            error_message
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "Err": "page and count should be set and >0" }));
    }
}

#[tokio::test]
async fn get_batch_validation_happens_before_storage() {
    let test_app = TestApp::spawn_app().await;
    // Any storage access now fails with a different message
    test_app.store.pool().close().await;

    let response = test_app
        .post_get_email_batch(json!({ "Page": 0, "Count": 0 }))
        .await;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Err"], "page and count should be set and >0");

    let response = test_app
        .post_get_email_batch(json!({ "Page": 1, "Count": 1 }))
        .await;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_ne!(body["Err"], "page and count should be set and >0");
}

#[tokio::test]
async fn get_batch_pages_through_active_entries() {
    let test_app = TestApp::spawn_app().await;
    for email in ["e1@x.com", "e2@x.com", "e3@x.com", "e4@x.com", "e5@x.com"] {
        test_app.post_create_email(email).await;
    }

    let test_cases = vec![
        (1, vec!["e1@x.com", "e2@x.com"]),
        (2, vec!["e3@x.com", "e4@x.com"]),
        (3, vec!["e5@x.com"]),
    ];

    for (page, expected) in test_cases {
        let response = test_app
            .post_get_email_batch(json!({ "Page": page, "Count": 2 }))
            .await;

        assert_eq!(200, response.status().as_u16());
        let body: Vec<Value> = response.json().await.unwrap();
        let emails: Vec<&str> = body
            .iter()
            .map(|entry| entry["Email"].as_str().unwrap())
            .collect();
        assert_eq!(emails, expected, "unexpected entries on page {}", page);
    }
}

#[tokio::test]
async fn update_requires_confirmed_at_and_opt_out() {
    let test_app = TestApp::spawn_app().await;
    test_app.post_create_email("a@x.com").await;

    let test_cases = vec![
        (json!({ "Email": "a@x.com" }), "missing both fields"),
        (
            json!({ "Email": "a@x.com", "ConfirmedAt": CONFIRMED }),
            "missing OptOut",
        ),
        (json!({ "Email": "a@x.com", "OptOut": true }), "missing ConfirmedAt"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.put_update_email(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload had {}",
            error_message
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["Err"],
            "confirmedAt and optOut fields should not be empty"
        );
    }

    let body: Value = test_app
        .post_get_email("a@x.com")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["ConfirmedAt"], EPOCH);
    assert_eq!(body["OptOut"], false);
}

#[tokio::test]
async fn update_inserts_an_unknown_email() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .put_update_email(json!({
            "Email": "new@x.com",
            "ConfirmedAt": CONFIRMED,
            "OptOut": false
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["Email"], "new@x.com");
    assert_eq!(body["ConfirmedAt"], CONFIRMED);
}

#[tokio::test]
async fn delete_of_an_unknown_email_is_a_no_op() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_delete_email("nobody@x.com").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({}));
    assert_eq!(test_app.count_rows("nobody@x.com").await, 0);
}

#[tokio::test]
async fn requests_with_the_wrong_method_are_ignored() {
    let test_app = TestApp::spawn_app().await;

    let test_cases = vec![
        (reqwest::Method::GET, "/email/create"),
        (reqwest::Method::PUT, "/email/create"),
        (reqwest::Method::GET, "/email/get"),
        (reqwest::Method::GET, "/email/get_batch"),
        (reqwest::Method::POST, "/email/update"),
        (reqwest::Method::DELETE, "/email/delete"),
    ];

    for (method, path) in test_cases {
        let response = test_app
            .http_client
            .request(method.clone(), format!("{}{}", test_app.json_address, path))
            .json(&json!({ "Email": "a@x.com", "ConfirmedAt": CONFIRMED, "OptOut": false }))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(200, response.status().as_u16(), "{} {}", method, path);
        assert_eq!(response.text().await.unwrap(), "", "{} {}", method, path);
    }

    assert_eq!(test_app.count_rows("a@x.com").await, 0);
}

#[tokio::test]
async fn subscriber_lifecycle() {
    let test_app = TestApp::spawn_app().await;

    test_app.post_create_email("a@x.com").await;
    let body: Value = test_app
        .post_get_email("a@x.com")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["ConfirmedAt"], EPOCH);
    assert_eq!(body["OptOut"], false);

    let response = test_app
        .put_update_email(json!({
            "Email": "a@x.com",
            "ConfirmedAt": CONFIRMED,
            "OptOut": false
        }))
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = test_app
        .post_get_email("a@x.com")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["ConfirmedAt"], CONFIRMED);

    let response = test_app.post_delete_email("a@x.com").await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = test_app
        .post_get_email("a@x.com")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["OptOut"], true);

    let batch: Vec<Value> = test_app
        .post_get_email_batch(json!({ "Page": 1, "Count": 10 }))
        .await
        .json()
        .await
        .unwrap();
    assert!(batch.is_empty());
}
