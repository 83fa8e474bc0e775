mod common;

use common::{closed_port_url, harness};
use console_client::{
    ApiOutcome, ClientError, Envelope, ErrorCatalog, HttpClient, NotifyingGateway, Page,
    RecordingNotifier, RequestSpec,
};
use console_core::{ClientSettings, NotificationSettings};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_success_envelope_is_returned_unmodified() {
    let h = harness().await;

    let spec = RequestSpec::new("/user/list")
        .data(json!({ "curPage": 1, "pageSize": 10 }));
    let envelope: Envelope<Value> = h.gateway.request(spec).await.unwrap();

    assert_eq!(
        envelope,
        Envelope::new(json!({ "list": [], "count": 0 }), "", 0)
    );
    assert!(h.notifier.is_empty());

    let recorded = h.state.last().unwrap();
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.body, json!({ "curPage": 1, "pageSize": 10 }));
}

#[tokio::test]
async fn test_typed_envelope() {
    let h = harness().await;

    let envelope: Envelope<Page<Value>> = h
        .client
        .request(RequestSpec::new("/user/list"))
        .await
        .unwrap();
    assert!(envelope.is_success());
    assert_eq!(envelope.data, Page::default());
}

#[tokio::test]
async fn test_404_notifies_catalog_label_and_fails() {
    let h = harness().await;

    let spec = RequestSpec::new("/status/404").data(json!({ "curPage": 1, "pageSize": 10 }));
    let result = h.gateway.request::<Value>(spec).await;

    match result {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(h.notifier.texts(), vec!["Not Found".to_string()]);
}

#[tokio::test]
async fn test_401_server_message_wins() {
    let h = harness().await;

    let result = h
        .gateway
        .request::<Value>(RequestSpec::new("/expired"))
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().status(), Some(401));
    assert_eq!(h.notifier.texts(), vec!["session expired".to_string()]);
}

#[tokio::test]
async fn test_every_catalog_status_notifies_once() {
    let h = harness().await;

    for (code, label) in ErrorCatalog::new().entries() {
        h.notifier.drain();
        let result = h
            .gateway
            .request::<Value>(RequestSpec::new(format!("/status/{code}")))
            .await;

        assert!(result.is_err(), "status {code} should fail");
        assert_eq!(
            h.notifier.texts(),
            vec![label.to_string()],
            "status {code} should notify once"
        );
    }
}

#[tokio::test]
async fn test_uncatalogued_status_fails_without_notification() {
    let h = harness().await;

    let result = h
        .gateway
        .request::<Value>(RequestSpec::new("/status/418"))
        .await;

    assert_eq!(result.unwrap_err().status(), Some(418));
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_catalog() {
    let h = harness().await;

    let result = h
        .gateway
        .request::<Value>(RequestSpec::new("/plain-error"))
        .await;

    match result {
        Err(ClientError::Status {
            status,
            message,
            body,
        }) => {
            assert_eq!(status, 502);
            assert_eq!(message, None);
            assert!(body.contains("bad gateway"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(h.notifier.texts(), vec!["Bad Gateway".to_string()]);
}

#[tokio::test]
async fn test_network_error_notifies_and_fails() {
    let base_url = closed_port_url().await;
    let client = HttpClient::new(base_url).unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let gateway = NotifyingGateway::new(client, notifier.clone());

    let result = gateway.request::<Value>(RequestSpec::new("/user/list")).await;

    assert!(matches!(result, Err(ClientError::Network(_))));
    assert_eq!(notifier.texts(), vec!["Network Error".to_string()]);
}

#[tokio::test]
async fn test_application_failure_is_data_not_error() {
    let h = harness().await;

    let envelope: Envelope<Option<Value>> = h
        .gateway
        .request(RequestSpec::new("/business-fail"))
        .await
        .unwrap();

    assert_eq!(envelope.errno, 1002);
    assert_eq!(envelope.msg, "用户名已存在");
    assert_eq!(envelope.data, None);
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_application_failure_with_null_data_decodes_into_typed_envelope() {
    let h = harness().await;

    let envelope: Envelope<Page<Value>> = h
        .gateway
        .request(RequestSpec::new("/business-fail"))
        .await
        .unwrap();

    assert_eq!(envelope.errno, 1002);
    assert_eq!(envelope.msg, "用户名已存在");
    assert_eq!(envelope.data, Page::default());
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_success_with_mismatched_data_is_decode_error() {
    let h = harness().await;

    let result = h
        .gateway
        .request::<Vec<Value>>(RequestSpec::new("/counter"))
        .await;

    assert!(matches!(result, Err(ClientError::Decode(_))));
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_application_failure_notification_when_enabled() {
    let h = harness().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let settings = NotificationSettings {
        notify_application_failures: true,
        ..Default::default()
    };
    let gateway = NotifyingGateway::with_settings(h.client.clone(), notifier.clone(), settings);

    let outcome: ApiOutcome<Value> = gateway.call(RequestSpec::new("/business-fail")).await;
    assert_eq!(
        outcome,
        ApiOutcome::ApplicationFailure {
            errno: 1002,
            msg: "用户名已存在".to_string()
        }
    );

    let _: ApiOutcome<Value> = gateway.call(RequestSpec::new("/business-fail-empty")).await;
    let _: ApiOutcome<Value> = gateway.call(RequestSpec::new("/user/list")).await;

    assert_eq!(
        notifier.texts(),
        vec![
            "用户名已存在".to_string(),
            "Request failed, please retry".to_string()
        ]
    );
}

#[tokio::test]
async fn test_identical_requests_are_independent() {
    let h = harness().await;

    let first: Envelope<Value> = h.client.request(RequestSpec::new("/counter")).await.unwrap();
    let second: Envelope<Value> = h.client.request(RequestSpec::new("/counter")).await.unwrap();

    assert_eq!(first.data, json!({ "hit": 1 }));
    assert_eq!(second.data, json!({ "hit": 2 }));
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let h = harness().await;

    let (a, b) = tokio::join!(
        h.client.request::<Value>(RequestSpec::new("/counter")),
        h.client.request::<Value>(RequestSpec::new("/status/500")),
    );

    assert!(a.unwrap().is_success());
    assert_eq!(b.unwrap_err().status(), Some(500));
    assert_eq!(h.state.hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_with_params_and_headers() {
    let h = harness().await;

    let spec = RequestSpec::get("/user/remove")
        .params(json!({ "id": 3 }))
        .header("X-Client", "console")
        .unwrap();
    let envelope: Envelope<Value> = h.client.request(spec).await.unwrap();

    assert_eq!(envelope.data["method"], "GET");
    assert_eq!(envelope.data["path"], "/user/remove");
    assert_eq!(envelope.data["query"], json!({ "id": "3" }));
    assert_eq!(envelope.data["body"], Value::Null);
    assert_eq!(envelope.data["xClient"], "console");
}

#[tokio::test]
async fn test_nested_params_are_rejected_before_sending() {
    let h = harness().await;

    let spec = RequestSpec::get("/user/remove").params(json!({ "filter": { "a": 1 } }));
    let result = h.gateway.request::<Value>(spec).await;

    assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    assert!(h.notifier.is_empty());
    assert!(h.state.requests().is_empty());

    let spec = RequestSpec::get("/user/remove").params(json!({ "ids": [1, 2] }));
    let outcome: ApiOutcome<Value> = h.gateway.call(spec).await;
    assert!(matches!(outcome, ApiOutcome::Rejected { .. }));
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_null_params_are_skipped() {
    let h = harness().await;

    let spec = RequestSpec::get("/user/remove").params(json!({ "id": 3, "name": null }));
    let envelope: Envelope<Value> = h.client.request(spec).await.unwrap();

    assert_eq!(envelope.data["query"], json!({ "id": "3" }));
}

#[tokio::test]
async fn test_call_reports_unnotified_transport_failure() {
    let h = harness().await;

    let outcome: ApiOutcome<Value> = h.gateway.call(RequestSpec::new("/status/418")).await;

    assert_eq!(
        outcome,
        ApiOutcome::TransportFailure {
            status: Some(418),
            message: "HTTP 418".to_string(),
            notified: false,
        }
    );
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_explicit_method() {
    let h = harness().await;

    let spec = RequestSpec::new("/anything").method(Method::PUT).data(json!({ "a": 1 }));
    let envelope: Envelope<Value> = h.client.request(spec).await.unwrap();

    assert_eq!(envelope.data["method"], "PUT");
    assert_eq!(envelope.data["body"], json!({ "a": 1 }));
}

#[tokio::test]
async fn test_default_headers_from_settings() {
    let h = harness().await;
    let mut settings = ClientSettings::new(h.base_url.clone());
    settings
        .headers
        .insert("X-Client".to_string(), "from-config".to_string());
    let client = HttpClient::from_settings(&settings).unwrap();

    let envelope: Envelope<Value> = client.request(RequestSpec::new("/echo")).await.unwrap();
    assert_eq!(envelope.data["xClient"], "from-config");
}

#[tokio::test]
async fn test_credentials_are_kept_between_requests() {
    let h = harness().await;

    let before: Envelope<Option<Value>> = h.client.request(RequestSpec::new("/whoami")).await.unwrap();
    assert_eq!(before.errno, 401);

    let login: Envelope<Value> = h
        .client
        .request(RequestSpec::new("/user/login").data(json!({ "userName": "admin" })))
        .await
        .unwrap();
    assert!(login.is_success());

    let after: Envelope<Option<Value>> = h.client.request(RequestSpec::new("/whoami")).await.unwrap();
    assert!(after.is_success());
    assert_eq!(after.data, Some(json!("admin")));
}

#[tokio::test]
async fn test_without_credentials_no_cookie_is_sent() {
    let h = harness().await;
    let mut settings = ClientSettings::new(h.base_url.clone());
    settings.with_credentials = false;
    let client = HttpClient::from_settings(&settings).unwrap();

    let _: Envelope<Value> = client
        .request(RequestSpec::new("/user/login").data(json!({})))
        .await
        .unwrap();
    let after: Envelope<Option<Value>> = client.request(RequestSpec::new("/whoami")).await.unwrap();
    assert_eq!(after.errno, 401);
}

#[tokio::test]
async fn test_invalid_envelope_is_decode_error_without_notification() {
    let h = harness().await;

    let result = h
        .gateway
        .request::<Value>(RequestSpec::new("/not-envelope"))
        .await;

    assert!(matches!(result, Err(ClientError::Decode(_))));
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_call_folds_transport_failure() {
    let h = harness().await;

    let outcome: ApiOutcome<Page<Value>> = h.gateway.call(RequestSpec::new("/status/503")).await;
    assert_eq!(
        outcome,
        ApiOutcome::TransportFailure {
            status: Some(503),
            message: "Service Unavailable".to_string(),
            notified: true,
        }
    );
    assert_eq!(h.notifier.len(), 1);

    let outcome: ApiOutcome<Page<Value>> = h.client.call(RequestSpec::new("/user/list")).await;
    assert_eq!(outcome, ApiOutcome::Success(Page::default()));
}
