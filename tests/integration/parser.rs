//! Parser endpoints: job submission and status.

use crate::integration::mock_server::{MockServerFixture, TEST_KEY};
use intervene::types::{ExecuteParams, IdentifyParams, JobKind, JobState};
use intervene::Error;
use mockito::Matcher;
use serde::Serialize;
use serde_json::json;

#[tokio::test]
async fn test_identify_posts_params_verbatim() {
    let mut fixture = MockServerFixture::new().await;
    let body = json!({
        "text": "Invoice #42\nTotal: $10.00",
        "options": {"languages": ["en", "de"], "ocr": false}
    });

    let mock = fixture
        .server
        .mock("POST", "/v1/parser/identify")
        .match_header("authorization", "Bearer sk_test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(body.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"job_id":"job_identify_1","status":"queued"}"#)
        .create_async()
        .await;

    let submission = fixture.client().identify(&body).await.unwrap();

    mock.assert_async().await;
    assert_eq!(submission.job_id, "job_identify_1");
    assert_eq!(submission.status, Some(JobState::Queued));
}

#[tokio::test]
async fn test_execute_posts_typed_params() {
    let mut fixture = MockServerFixture::new().await;
    let params = ExecuteParams::new()
        .with("parser_id", "prs_123")
        .with("data", json!({"url": "https://example.com/invoice.pdf"}));

    let mock = fixture
        .server
        .mock("POST", "/v1/parser/execute")
        .match_header("authorization", "Bearer sk_test")
        .match_body(Matcher::Json(json!({
            "parser_id": "prs_123",
            "data": {"url": "https://example.com/invoice.pdf"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"job_exec_1","queue_position":3}"#)
        .create_async()
        .await;

    let submission = fixture.client().execute(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(submission.job_id, "job_exec_1");
    assert_eq!(submission.status, None);
    assert_eq!(submission.extra.get("queue_position"), Some(&json!(3)));
}

#[tokio::test]
async fn test_identify_accepts_any_serializable_body() {
    #[derive(Serialize)]
    struct Body<'a> {
        file_url: &'a str,
        pages: Vec<u32>,
    }

    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/v1/parser/identify")
        .match_body(Matcher::Json(json!({
            "file_url": "https://example.com/a.pdf",
            "pages": [1, 2]
        })))
        .with_status(200)
        .with_body(r#"{"job_id":"j"}"#)
        .create_async()
        .await;

    let body = Body {
        file_url: "https://example.com/a.pdf",
        pages: vec![1, 2],
    };
    fixture.client().identify(&body).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_job_status_substitutes_job_id_verbatim() {
    let mut fixture = MockServerFixture::new().await;
    let job_id = "job-01HX_abc.def~9";

    let mock = fixture
        .mock_json(
            "GET",
            &format!("/v1/parser/{}/status", job_id),
            200,
            r#"{"job_id":"job-01HX_abc.def~9","status":"running","job_kind":"execute"}"#,
        )
        .await;

    let status = fixture.client().job_status(job_id).await.unwrap();

    mock.assert_async().await;
    assert_eq!(status.job_id.as_deref(), Some(job_id));
    assert_eq!(status.status, JobState::Running);
    assert_eq!(status.kind, Some(JobKind::Execute));
    assert!(status.result.is_none());
}

#[tokio::test]
async fn test_identify_job_status_types_result() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/job_1/status",
            200,
            r#"{
                "job_id": "job_1",
                "status": "completed",
                "job_kind": "identify",
                "result": {"document_type": "invoice", "confidence": 0.93}
            }"#,
        )
        .await;

    let status = fixture.client().identify_job_status("job_1").await.unwrap();

    assert_eq!(status.kind, JobKind::Identify);
    assert!(status.status.is_terminal());
    let result = status.result.expect("completed job has a result");
    assert_eq!(result.get("document_type"), Some(&json!("invoice")));
}

#[tokio::test]
async fn test_execute_job_status_reads_type_discriminator() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/job_2/status",
            200,
            r#"{"job_id":"job_2","status":"completed","type":"execute","result":{"total":"10.00"}}"#,
        )
        .await;

    let status = fixture.client().execute_job_status("job_2").await.unwrap();
    assert_eq!(
        status.result.unwrap().get("total"),
        Some(&json!("10.00"))
    );
}

#[tokio::test]
async fn test_typed_status_rejects_wrong_job_kind() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/job_3/status",
            200,
            r#"{"job_id":"job_3","status":"completed","job_kind":"execute","result":{}}"#,
        )
        .await;

    let err = fixture
        .client()
        .identify_job_status("job_3")
        .await
        .unwrap_err();

    match err {
        Error::JobKindMismatch { expected, found } => {
            assert_eq!(expected, JobKind::Identify);
            assert_eq!(found, Some(JobKind::Execute));
        }
        other => panic!("expected JobKindMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_with_unrelated_type_field_and_job_kind() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/p1/status",
            200,
            r#"{"status":"completed","type":"pdf","job_kind":"identify"}"#,
        )
        .await;

    let status = fixture.client().job_status("p1").await.unwrap();
    assert_eq!(status.kind, Some(JobKind::Identify));
    assert_eq!(status.extra.get("type"), Some(&json!("pdf")));

    let typed = fixture.client().identify_job_status("p1").await.unwrap();
    assert_eq!(typed.status, JobState::Completed);
}

#[tokio::test]
async fn test_status_with_id_and_job_id() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/p2/status",
            200,
            r#"{"id":"j","job_id":"j","status":"completed"}"#,
        )
        .await;

    let status = fixture.client().job_status("p2").await.unwrap();
    assert_eq!(status.job_id.as_deref(), Some("j"));
    assert_eq!(status.status, JobState::Completed);
}

#[tokio::test]
async fn test_status_null_is_unknown() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/v1/parser/p3/status",
            200,
            r#"{"job_id":"j","status":null,"job_kind":"identify"}"#,
        )
        .await;

    let status = fixture.client().identify_job_status("p3").await.unwrap();
    assert_eq!(status.status, JobState::Unknown);
    assert!(status.result.is_none());
}

#[tokio::test]
async fn test_submission_with_id_and_job_id() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "POST",
            "/v1/parser/execute",
            200,
            r#"{"id":"job_9","job_id":"job_9","status":"queued"}"#,
        )
        .await;

    let submission = fixture.client().execute(&json!({})).await.unwrap();
    assert_eq!(submission.job_id, "job_9");
    assert_eq!(submission.status, Some(JobState::Queued));
}

#[tokio::test]
async fn test_error_status_surfaces_status_and_body() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "POST",
            "/v1/parser/identify",
            422,
            r#"{"detail":"text or file_url is required"}"#,
        )
        .await;

    let err = fixture
        .client()
        .identify(&IdentifyParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("file_url is required"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_key_is_rejected_by_server() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("GET", "/v1/parser/job_4/status", 200, r#"{"status":"queued"}"#)
        .await;

    // The fixture mock only matches the test key; anything else falls
    // through to mockito's 501.
    let err = fixture
        .client_with_key("sk_other")
        .job_status("job_4")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(501));

    let ok = fixture.client_with_key(TEST_KEY).job_status("job_4").await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_malformed_json_is_a_serialization_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("GET", "/v1/parser/job_5/status", 200, "<html>oops</html>")
        .await;

    let err = fixture.client().job_status("job_5").await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_host_with_trailing_slash() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json("GET", "/v1/parser/job_6/status", 200, r#"{"status":"queued"}"#)
        .await;

    let client = intervene::InterveneClient::new(
        intervene::ClientOptions::new(TEST_KEY).with_host(format!("{}/", fixture.base_url)),
    )
    .unwrap();
    client.job_status("job_6").await.unwrap();
    mock.assert_async().await;
}
