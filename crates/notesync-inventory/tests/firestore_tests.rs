//! Integration tests against a mocked Firestore REST endpoint.

use serde_json::json;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notesync_core::{InventoryRecord, SourceStatus};
use notesync_inventory::{FirestoreConfig, FirestoreStore};

const DOCS_PATH: &str = "/v1/projects/proj-1/databases/(default)/documents/notebooklm_sources";

async fn mock_metadata_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(
            "/computeMetadata/v1/instance/service-accounts/default/token",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fs-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

fn store_for(server: &MockServer) -> FirestoreStore {
    let config = FirestoreConfig::new("proj-1").with_base_url(&server.uri());
    FirestoreStore::new(config).unwrap()
}

fn document(display_name: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/proj-1/databases/(default)/documents/notebooklm_sources/{display_name}"),
        "fields": {
            "name": { "stringValue": format!("projects/42/locations/global/notebooks/nb-1/sources/{display_name}") },
            "displayName": { "stringValue": display_name },
            "status": { "stringValue": "SOURCE_STATUS_COMPLETE" },
            "metadata": { "mapValue": { "fields": { "wordCount": { "integerValue": "120" } } } }
        }
    })
}

#[tokio::test]
async fn fetches_and_decodes_all_documents() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(bearer_token("fs-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("a.pdf"), document("b.docx")]
        })))
        .mount(&server)
        .await;

    let records = store_for(&server).fetch_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].display_name, "a.pdf");
    assert_eq!(records[0].status, SourceStatus::Complete);
    assert!(records[0].extra.contains_key("metadata"));
}

#[tokio::test]
async fn follows_page_tokens() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .and(query_param("pageToken", "cursor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("b.docx")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("a.pdf")],
            "nextPageToken": "cursor-1"
        })))
        .mount(&server)
        .await;

    let records = store_for(&server).fetch_all().await.unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.docx"]);
}

#[tokio::test]
async fn empty_collection_is_an_empty_inventory() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let records = store_for(&server).fetch_all().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn upsert_patches_document_keyed_by_display_name() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("PATCH"))
        .and(path(format!("{DOCS_PATH}/report.pdf")))
        .and(bearer_token("fs-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": format!("projects/proj-1/databases/(default)/documents/notebooklm_sources/report.pdf")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = InventoryRecord::new(
        "projects/42/locations/global/notebooks/nb-1/sources/abc",
        "report.pdf",
        SourceStatus::Complete,
    );
    store_for(&server).upsert(&record).await.unwrap();
}

#[tokio::test]
async fn delete_targets_the_document_url() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("DELETE"))
        .and(path(format!("{DOCS_PATH}/old.pdf")))
        .and(bearer_token("fs-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server).remove("old.pdf").await.unwrap();
}

#[tokio::test]
async fn undecodable_documents_are_skipped_not_fatal() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                document("a.pdf"),
                {
                    "name": "projects/proj-1/databases/(default)/documents/notebooklm_sources/broken",
                    "fields": { "displayName": { "stringValue": "broken" } }
                }
            ]
        })))
        .mount(&server)
        .await;

    let records = store_for(&server).fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].display_name, "a.pdf");
}

#[tokio::test]
async fn api_failure_is_surfaced_with_status() {
    let server = MockServer::start().await;
    mock_metadata_token(&server).await;

    Mock::given(method("GET"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let err = store_for(&server).fetch_all().await.unwrap_err();
    assert!(err.to_string().contains("403"));
}
