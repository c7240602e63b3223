use karaoke_engine::{
    AudioUpload, FailureKind, JobOutput, JobSubmitter, ReqwestSubmitter, SubmitSettings,
    PROCESS_PATH,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upload() -> AudioUpload {
    AudioUpload {
        file_name: "song.mp3".to_string(),
        media_type: "audio/mpeg".to_string(),
        bytes: b"ID3-not-really-audio".to_vec().into(),
    }
}

fn submitter(server: &MockServer) -> ReqwestSubmitter {
    let origin = Url::parse(&server.uri()).unwrap();
    ReqwestSubmitter::new(SubmitSettings::for_origin(&origin, PROCESS_PATH).unwrap())
}

#[test]
fn endpoint_keeps_origin_prefix() {
    let origin = Url::parse("https://example.com/karaoke/").unwrap();
    let settings = SubmitSettings::for_origin(&origin, PROCESS_PATH).unwrap();
    assert_eq!(
        settings.endpoint.as_str(),
        "https://example.com/karaoke/api/process-karaoke"
    );
    assert_eq!(settings.field_name, "file");
    assert_eq!(settings.request_timeout, None);
}

#[tokio::test]
async fn submits_file_as_single_multipart_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\"; filename=\"song.mp3\""))
        .and(body_string_contains("Content-Type: audio/mpeg"))
        .and(body_string_contains("ID3-not-really-audio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Processing complete!",
            "video_url": "/videos/out123.mp4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = submitter(&server).submit(upload()).await.expect("submit ok");
    assert_eq!(
        output,
        JobOutput {
            video_url: "/videos/out123.mp4".to_string(),
        }
    );
}

#[tokio::test]
async fn error_body_is_carried_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(
            ResponseTemplate::new(413).set_body_json(serde_json::json!({"error": "file too large"})),
        )
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(413));
    assert_eq!(err.server_message.as_deref(), Some("file too large"));
}

#[tokio::test]
async fn error_string_survives_unexpected_sibling_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(413).set_body_json(serde_json::json!({
            "error": "file too large",
            "message": {"limit": 10}
        })))
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(413));
    assert_eq!(err.server_message.as_deref(), Some("file too large"));
}

#[tokio::test]
async fn success_tolerates_non_string_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"stage": "done"},
            "video_url": "/videos/out9.mp4"
        })))
        .mount(&server)
        .await;

    let output = submitter(&server).submit(upload()).await.expect("submit ok");
    assert_eq!(output.video_url, "/videos/out9.mp4");
}

#[tokio::test]
async fn non_string_error_is_not_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": 42})))
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn non_json_error_has_no_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn success_without_video_url_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn success_with_invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = submitter(&server).submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    // Bind and release a port so nothing listens on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let origin = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let submitter = ReqwestSubmitter::new(SubmitSettings::for_origin(&origin, PROCESS_PATH).unwrap());

    let err = submitter.submit(upload()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn invalid_media_type_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let bad = AudioUpload {
        media_type: "not a mime".to_string(),
        ..upload()
    };
    let err = submitter(&server).submit(bad).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidRequest);
}
