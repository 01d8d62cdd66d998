//! Tests for the resource facades: paths, bodies, local validation.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tycho::types::{
    AssistantParams, FileUpload, MessageContent, MessageParams, Order, PageRequest, Role,
    RunParams, RunStatus, ThreadAndRunParams, ThreadParams, ToolOutput,
};
use tycho::util::retry::RetryPolicy;
use tycho::{Client, ClientConfig};

fn test_client(server: &MockServer) -> Client {
    Client::new(ClientConfig::new("test-key").with_base_url(server.uri()))
        .unwrap()
        .with_retry_policy(RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            multiplier: 1.0,
        })
}

fn assistant_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "assistant",
        "created_at": 1700000000,
        "model": "gpt-4",
        "tools": [],
        "file_ids": [],
        "metadata": {}
    })
}

fn run_body(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "thread.run",
        "created_at": 1700000000,
        "thread_id": "thread_1",
        "assistant_id": "asst_1",
        "status": status,
        "model": "gpt-4",
        "tools": [],
        "file_ids": [],
        "metadata": {}
    })
}

#[tokio::test]
async fn create_assistant_posts_the_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assistants"))
        .and(body_string_contains("\"model\":\"gpt-4\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(assistant_body("asst_new")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let assistant = client
        .assistants()
        .create(AssistantParams::new("gpt-4"))
        .await
        .unwrap();
    assert_eq!(assistant.id, "asst_new");
}

#[tokio::test]
async fn list_assistants_serializes_only_non_default_cursor_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assistants"))
        .and(query_param("limit", "10"))
        .and(query_param("order", "desc"))
        .and(query_param("after", "asst_0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [assistant_body("asst_1")],
            "first_id": "asst_1",
            "last_id": "asst_1",
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .assistants()
        .list(
            &PageRequest::new()
                .limit(10)
                .order(Order::Desc)
                .after("asst_0"),
        )
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.last_id.as_deref(), Some("asst_1"));
    assert!(!page.has_more);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default();
    assert!(!query.contains("before"), "before must be omitted: {query}");
}

#[tokio::test]
async fn out_of_range_limit_issues_no_request() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .assistants()
        .list(&PageRequest::new().limit(101))
        .await
        .unwrap_err();
    assert!(matches!(err, tycho::TychoError::InvalidArgument(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_thread_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .threads()
        .create(ThreadParams::new(Vec::new()))
        .await
        .unwrap_err();
    match err {
        tycho::TychoError::InvalidArgument(message) => {
            assert!(message.contains("non-empty"), "unexpected message: {message}")
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_text_content_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .threads()
        .create(ThreadParams::new(vec![MessageParams::user("")]))
        .await
        .unwrap_err();
    assert!(matches!(err, tycho::TychoError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_user_message_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let params = MessageParams {
        role: Role::Assistant,
        content: vec![MessageContent::text("hello")],
        file_ids: Vec::new(),
        metadata: Default::default(),
    };
    let err = client.messages("thread_1").create(params).await.unwrap_err();
    assert!(matches!(err, tycho::TychoError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn run_with_empty_thread_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .runs("")
        .create(RunParams::new("asst_1"))
        .await
        .unwrap_err();
    assert!(matches!(err, tycho::TychoError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_run_posts_to_the_thread_runs_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .and(body_string_contains("\"assistant_id\":\"asst_1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("run_1", "queued")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let run = client
        .runs("thread_1")
        .create(RunParams::new("asst_1"))
        .await
        .unwrap();
    assert_eq!(run.status(), RunStatus::Queued);
    assert!(!run.is_terminal());
}

#[tokio::test]
async fn cancel_posts_to_the_cancel_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs/run_1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("run_1", "cancelling")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let run = client.runs("thread_1").cancel("run_1").await.unwrap();
    assert_eq!(run.status(), RunStatus::Cancelling);
}

#[tokio::test]
async fn submit_tool_outputs_posts_the_outputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs/run_1/submit_tool_outputs"))
        .and(body_string_contains("\"tool_call_id\":\"call_1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("run_1", "in_progress")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let run = client
        .runs("thread_1")
        .submit_tool_outputs(
            "run_1",
            vec![ToolOutput {
                tool_call_id: "call_1".to_string(),
                output: "22C".to_string(),
            }],
        )
        .await
        .unwrap();
    assert_eq!(run.status(), RunStatus::InProgress);
}

#[tokio::test]
async fn create_thread_and_run_posts_to_threads_runs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/runs"))
        .and(body_string_contains("\"assistant_id\":\"asst_1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("run_1", "queued")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let run = client
        .threads()
        .create_and_run(ThreadAndRunParams {
            assistant_id: "asst_1".to_string(),
            thread: ThreadParams::new(vec![MessageParams::user("hello")]),
        })
        .await
        .unwrap();
    assert_eq!(run.id, "run_1");
}

#[tokio::test]
async fn retrieve_run_step_uses_the_nested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1/steps/step_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "step_1",
            "object": "thread.run.step",
            "created_at": 1700000000,
            "assistant_id": "asst_1",
            "thread_id": "thread_1",
            "run_id": "run_1",
            "type": "message_creation",
            "status": "completed",
            "step_details": {
                "type": "message_creation",
                "message_creation": { "message_id": "msg_1" }
            },
            "metadata": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let step = client
        .runs("thread_1")
        .steps("run_1")
        .retrieve("step_1")
        .await
        .unwrap();
    assert_eq!(step.id, "step_1");
    assert_eq!(step.run_id, "run_1");
}

#[tokio::test]
async fn attach_assistant_file_posts_the_file_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assistants/asst_1/files"))
        .and(body_string_contains("\"file_id\":\"file_1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file_1",
            "object": "assistant.file",
            "created_at": 1700000000,
            "assistant_id": "asst_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = client
        .assistants()
        .files("asst_1")
        .attach("file_1")
        .await
        .unwrap();
    assert_eq!(file.assistant_id, "asst_1");
}

#[tokio::test]
async fn list_message_files_uses_the_nested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages/msg_1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{
                "id": "file_1",
                "object": "thread.message.file",
                "created_at": 1700000000,
                "message_id": "msg_1",
                "file_id": "file_1"
            }],
            "first_id": "file_1",
            "last_id": "file_1",
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .messages("thread_1")
        .files("msg_1")
        .list(&PageRequest::new())
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].message_id, "msg_1");
}

#[tokio::test]
async fn upload_file_sends_a_multipart_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("name=\"purpose\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file_1",
            "object": "file",
            "bytes": 5,
            "created_at": 1700000000,
            "filename": "notes.txt",
            "purpose": "assistants"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = client
        .files()
        .upload(FileUpload::new("notes.txt", b"hello".to_vec(), "assistants"))
        .await
        .unwrap();
    assert_eq!(file.filename, "notes.txt");

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .expect("upload sets a content type")
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary=tycho-"),
        "unexpected content type: {content_type}"
    );
}

#[tokio::test]
async fn upload_from_disk_reads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::write(&path, b"contents").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(wiremock::matchers::path("/files"))
        .and(body_string_contains("filename=\"report.txt\""))
        .and(body_string_contains("contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file_2",
            "object": "file",
            "bytes": 8,
            "created_at": 1700000000,
            "filename": "report.txt",
            "purpose": "assistants"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = client.files().upload_path(&path, "assistants").await.unwrap();
    assert_eq!(file.id, "file_2");
}

#[tokio::test]
async fn list_files_filters_by_purpose() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("purpose", "assistants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{
                "id": "file_1",
                "object": "file",
                "bytes": 5,
                "created_at": 1700000000,
                "filename": "notes.txt",
                "purpose": "assistants"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client.files().list(Some("assistants")).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(!page.has_more);
    assert!(page.first_id.is_none());
}

#[tokio::test]
async fn file_content_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/file_1/content"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("raw bytes", "application/octet-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let bytes = client.files().content("file_1").await.unwrap();
    assert_eq!(bytes, b"raw bytes");
}

#[tokio::test]
async fn modify_thread_sends_a_metadata_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1"))
        .and(body_string_contains("\"metadata\""))
        .and(body_string_contains("\"owner\":\"tests\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "thread_1",
            "object": "thread",
            "created_at": 1700000000,
            "metadata": { "owner": "tests" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let metadata = [("owner".to_string(), "tests".to_string())]
        .into_iter()
        .collect();
    let thread = client.threads().modify("thread_1", metadata).await.unwrap();
    assert_eq!(
        thread.metadata.get("owner").map(String::as_str),
        Some("tests")
    );
}
