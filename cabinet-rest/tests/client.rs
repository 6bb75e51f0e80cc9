use cabinet_rest::{
    ClientError, HttpMethod, HttpResponse, MockBackend, OrderOptions, Payload, RestClient,
    RestConfig, RestError,
};
use serde_json::json;

fn client() -> (RestClient, MockBackend) {
    let mock = MockBackend::new();
    let config = RestConfig::new("https://db.example.co/", "anon-key");
    let client = RestClient::with_backend(&config, mock.clone()).unwrap();
    (client, mock)
}

#[test]
fn test_construction_rejects_relative_url() {
    let err = RestClient::with_backend(&RestConfig::new("/rest/v1", "k"), MockBackend::new())
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn test_construction_rejects_non_http_scheme() {
    let err = RestClient::new(&RestConfig::new("ftp://db.example.co", "k")).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn test_construction_rejects_empty_key() {
    let err = RestClient::new(&RestConfig::new("https://db.example.co", "")).unwrap_err();
    assert_eq!(err, ClientError::MissingApiKey);
}

#[tokio::test]
async fn test_execute_sends_one_get_with_auth_headers() {
    let (client, mock) = client();
    mock.push_json(200, json!([{"id": 1, "nom": "Martin"}]));

    let request = client
        .from("ministres")
        .select("id, nom")
        .where_eq("actif", true)
        .order_by("rang", OrderOptions::asc())
        .limit(10)
        .build();
    let payload = client.execute(&request).await.unwrap();
    assert_eq!(payload, Payload::Rows(vec![json!({"id": 1, "nom": "Martin"})]));

    let sent = mock.requests();
    assert_eq!(sent.len(), 1);
    let sent = &sent[0];
    assert_eq!(sent.method, HttpMethod::Get);
    assert_eq!(
        sent.url,
        "https://db.example.co/rest/v1/ministres?select=id%2Cnom&actif=eq.true&order=rang.asc&limit=10"
    );
    assert_eq!(sent.header("apikey"), Some("anon-key"));
    assert_eq!(sent.header("authorization"), Some("Bearer anon-key"));
    assert_eq!(sent.header("accept"), Some("application/json"));
    assert!(sent.body.is_none());
}

#[tokio::test]
async fn test_transport_failure_is_an_error_not_a_panic() {
    let (client, mock) = client();
    mock.push_transport_error("connection refused");

    let err = client
        .execute(&client.from("ministres").build())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RestError::Transport {
            message: "connection refused".into()
        }
    );
}

#[tokio::test]
async fn test_not_found_carries_backend_message() {
    let (client, mock) = client();
    mock.push_response(
        HttpResponse::json(404, &json!({"message": "not found"})).with_reason("Not Found"),
    );

    let err = client
        .execute(&client.from("inconnue").build())
        .await
        .unwrap_err();
    match err {
        RestError::Status { status, info } => {
            assert_eq!(status, 404);
            assert_eq!(info.message, "not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_null_data() {
    let (client, mock) = client();
    mock.push_response(HttpResponse::new(200, "<html>"));

    let payload = client.execute(&client.from("ministres").build()).await.unwrap();
    assert_eq!(payload, Payload::Null);
}

#[tokio::test]
async fn test_rpc_posts_json_params() {
    let (client, mock) = client();
    mock.push_json(200, json!({"total": 12}));

    let payload = client
        .rpc("compter_ministres", &json!({"parti": "Renaissance"}))
        .await
        .unwrap();
    assert_eq!(payload, Payload::Single(json!({"total": 12})));

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.url, "https://db.example.co/rest/v1/rpc/compter_ministres");
    assert_eq!(sent.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
    assert_eq!(body, json!({"parti": "Renaissance"}));
}

#[tokio::test]
async fn test_independent_requests_resolve_independently() {
    let (client, mock) = client();
    mock.push_json(200, json!([{"id": 1}]));
    mock.push_json(500, json!({"message": "boom"}));

    let first = client.execute(&client.from("a").build()).await;
    let second = client.execute(&client.from("b").build()).await;
    assert!(first.is_ok());
    assert_eq!(second.unwrap_err().message(), "boom");
    assert_eq!(mock.requests().len(), 2);
}
