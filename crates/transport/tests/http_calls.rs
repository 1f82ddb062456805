use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex, OnceLock},
    time::{Duration, Instant},
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Router,
};
use protocol::{
    envelope, routes, EndpointConfig, ErrorKind, PanelError, SelectService, TransportExt, NO_BODY,
};
use reqwest::Url;
use testresult::TestResult;
use tokio::net::TcpListener;
use transport::{http::RETRY_DELAY, HttpTransport};

static TRACING: OnceLock<()> = OnceLock::new();

fn init_tracing() {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .init();
    });
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    at: Instant,
}

impl Seen {
    fn query_param(&self, name: &str) -> Option<String> {
        let url = Url::parse(&format!("http://server{}", self.uri)).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Replies with scripted responses in order and records every request.
#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<(StatusCode, &'static str)>>,
    seen: Mutex<Vec<Seen>>,
}

impl Script {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn scripted(
    State(script): State<Arc<Script>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    script.seen.lock().unwrap().push(Seen {
        method,
        uri,
        headers,
        body,
        at: Instant::now(),
    });
    let (status, body) = script
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::IM_A_TEAPOT, "script exhausted"));
    (status, body.to_string())
}

async fn serve(replies: &[(StatusCode, &'static str)]) -> TestResult<(SocketAddr, Arc<Script>)> {
    let script = Arc::new(Script {
        replies: Mutex::new(replies.iter().copied().collect()),
        seen: Mutex::new(Vec::new()),
    });
    let app = Router::new().fallback(scripted).with_state(script.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok((addr, script))
}

fn client(addr: SocketAddr) -> TestResult<HttpTransport> {
    let config = EndpointConfig::new(format!("http://{addr}/"), "secret-token")?;
    Ok(HttpTransport::new(Arc::new(config))?)
}

const TRUE_BODY: &str = r#"{"result":{"data":{"json":true}}}"#;

#[tokio::test]
async fn get_sends_null_input_and_raw_token() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(StatusCode::OK, TRUE_BODY)]).await?;

    let can: bool = client(addr)?.get(&routes::projects::CAN_CREATE, &()).await?;
    assert!(can);

    let seen = script.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].uri.path(), "/api/trpc/projects.canCreateProject");
    assert_eq!(seen[0].query_param("input").as_deref(), Some(r#"{"json":null}"#));
    assert_eq!(seen[0].header(header::AUTHORIZATION), Some("secret-token"));
    Ok(())
}

#[tokio::test]
async fn get_encodes_input_into_query() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(StatusCode::OK, r#"{"result":{"data":{"json":null}}}"#)]).await?;

    let params = SelectService::new("my proj", "web");
    client(addr)?
        .get_unit(&routes::services::INSPECT.resolve(protocol::ServiceKind::App), &params)
        .await?;

    let seen = script.seen();
    assert_eq!(seen[0].uri.path(), "/api/trpc/services.app.inspectService");
    let input = seen[0].query_param("input").unwrap_or_default();
    let sent: SelectService = envelope::decode_request(input.as_bytes())?;
    assert_eq!(sent, params);
    Ok(())
}

#[tokio::test]
async fn post_without_body_sends_empty_json_request() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(StatusCode::OK, "")]).await?;

    client(addr)?
        .post_unit(&routes::settings::RESTART_TRAEFIK, NO_BODY)
        .await?;

    let seen = script.seen();
    assert_eq!(seen[0].method, Method::POST);
    assert!(seen[0].body.is_empty());
    assert_eq!(seen[0].header(header::CONTENT_TYPE), Some("application/json"));
    assert_eq!(seen[0].header(header::AUTHORIZATION), Some("secret-token"));
    Ok(())
}

#[tokio::test]
async fn post_sends_envelope_body() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(StatusCode::OK, "")]).await?;

    let params = SelectService::new("proj", "db");
    client(addr)?
        .post_unit(&routes::services::DEPLOY.resolve(protocol::ServiceKind::Mysql), Some(&params))
        .await?;

    let seen = script.seen();
    assert_eq!(seen[0].uri.path(), "/api/trpc/services.mysql.deployService");
    let sent: SelectService = envelope::decode_request(&seen[0].body)?;
    assert_eq!(sent, params);
    Ok(())
}

#[tokio::test]
async fn server_error_is_retried_once_after_delay() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[
        (StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        (StatusCode::OK, TRUE_BODY),
    ])
    .await?;

    let params = SelectService::new("proj", "web");
    let ok: bool = client(addr)?
        .post(&routes::projects::CREATE, Some(&params))
        .await?;
    assert!(ok);

    let seen = script.seen();
    assert_eq!(seen.len(), 2);
    assert!(seen[1].at - seen[0].at >= RETRY_DELAY);
    assert_eq!(seen[0].body, seen[1].body);
    assert!(!seen[1].body.is_empty());
    Ok(())
}

#[tokio::test]
async fn repeated_server_error_is_a_transport_error() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[
        (StatusCode::INTERNAL_SERVER_ERROR, r#"{"ok":false,"errorMessage":"first"}"#),
        (StatusCode::BAD_GATEWAY, r#"{"ok":false,"errorMessage":"second"}"#),
    ])
    .await?;

    let err = client(addr)?
        .get::<_, bool>(&routes::projects::CAN_CREATE, &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(502));
    assert!(matches!(err, PanelError::ServerUnavailable { attempts: 2, .. }));
    assert!(err.as_api().is_none());
    assert_eq!(script.seen().len(), 2);
    Ok(())
}

#[tokio::test]
async fn client_error_is_decoded_and_not_retried() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(
        StatusCode::FORBIDDEN,
        r#"{"ok":false,"errorMessage":"access denied"}"#,
    )])
    .await?;

    let err = client(addr)?
        .get::<_, bool>(&routes::auth::GET_USER, &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    let api = err.as_api().unwrap();
    assert_eq!(api.status, 403);
    assert_eq!(api.message, "access denied");
    assert_eq!(err.to_string(), "access denied");
    assert_eq!(script.seen().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unstructured_client_error_keeps_raw_body() -> TestResult {
    init_tracing();
    let (addr, _script) = serve(&[(StatusCode::NOT_FOUND, "no such route")]).await?;

    let err = client(addr)?
        .post_unit(&routes::projects::DESTROY, NO_BODY)
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status, 404);
    assert_eq!(api.message, "no such route");
    Ok(())
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[(StatusCode::OK, "<html>proxy page</html>")]).await?;

    let err = client(addr)?
        .get::<_, bool>(&routes::projects::CAN_CREATE, &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(script.seen().len(), 1);
    Ok(())
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() -> TestResult {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let started = Instant::now();
    let err = client(addr)?
        .get::<_, bool>(&routes::projects::CAN_CREATE, &())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert!(started.elapsed() >= RETRY_DELAY);
    Ok(())
}

#[tokio::test]
async fn deadline_covers_the_retry_delay() -> TestResult {
    init_tracing();
    let (addr, script) = serve(&[
        (StatusCode::SERVICE_UNAVAILABLE, ""),
        (StatusCode::OK, TRUE_BODY),
    ])
    .await?;

    let config = EndpointConfig::new(format!("http://{addr}"), "secret-token")?
        .with_deadline(Duration::from_millis(300))?;
    let transport = HttpTransport::new(Arc::new(config))?;

    let err = transport
        .get::<_, bool>(&routes::projects::CAN_CREATE, &())
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::DeadlineExceeded { .. }));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(script.seen().len(), 1);
    Ok(())
}
