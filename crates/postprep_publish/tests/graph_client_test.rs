//! Tests for the reqwest Graph API client against a local mock server.

use postprep_core::{Media, MediaField, MediaType};
use postprep_error::PostprepErrorKind;
use postprep_publish::{
    ContainerId, ContainerRequest, Credentials, GraphApi, GraphClient, PublishSettingsBuilder,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GraphClient {
    let settings = PublishSettingsBuilder::default()
        .api_base_url(format!("{}/v21.0/", server.uri()))
        .build()
        .expect("Valid settings");
    GraphClient::new(&settings, Credentials::new("test-token", "1784")).expect("Valid client")
}

#[tokio::test]
async fn test_create_container_posts_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1784/media"))
        .and(body_string_contains("image_url=https%3A%2F%2Fcdn.example%2Fa.jpg"))
        .and(body_string_contains("accessibility_caption=Boats"))
        .and(body_string_contains("access_token=test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "c-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut media = Media::from_url("https://cdn.example/a.jpg", MediaType::Image);
    media.apply(MediaField::AltText("Boats".into()));
    let request = ContainerRequest::for_media(&media).unwrap();

    let response = client(&mock_server).create_container(&request).await.unwrap();

    assert_eq!(response.usable_id(), Some("c-1"));
}

#[tokio::test]
async fn test_publish_container_sends_creation_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1784/media_publish"))
        .and(body_string_contains("creation_id=c-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "m-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .publish_container(&ContainerId("c-9".into()))
        .await
        .unwrap();

    assert_eq!(response.usable_id(), Some("m-1"));
}

#[tokio::test]
async fn test_api_error_is_response_without_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/1784/media"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {"message": "Invalid OAuth access token", "code": 190}
        })))
        .mount(&mock_server)
        .await;

    let request = ContainerRequest::carousel(vec![ContainerId("1".into())], "caption");
    let response = client(&mock_server).create_container(&request).await.unwrap();

    assert_eq!(response.usable_id(), None);
    assert_eq!(response.describe_failure(), "Invalid OAuth access token");
}

#[tokio::test]
async fn test_non_json_body_is_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .publish_container(&ContainerId("c-1".into()))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), PostprepErrorKind::Json(_)));
}
