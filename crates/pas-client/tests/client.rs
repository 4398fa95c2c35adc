use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::{TimeZone, Utc};
use pas_client::models::{
    AlarmStatusType, Coordinate, DataPoint, ExternalAlarmStatus, HalAlarmType, Measurement, Patch,
    PatchOperation, ThresholdType,
};
use pas_client::{PasClient, PasClientConfig, PasClientError, PointAlarmStatusApi, StaticToken};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};
use uuid::Uuid;

const NODE_ID: &str = "1b3c4c2e-8d53-4a0e-9d6c-0f4f1f6f0a55";
const MEASUREMENT_ID: &str = "0f8e1c9a-51a4-4f5b-8e77-2b9d2c7a6e01";
const USER_ID: &str = "9d4c2b1a-0e3f-4a5b-8c7d-6e5f4a3b2c1d";

#[derive(Debug, Clone, Copy)]
enum StubMode {
    Healthy,
    Failing,
}

#[derive(Debug, Clone)]
struct RecordedCall {
    name: String,
    node_id: String,
    authorization: Option<String>,
    accept: Option<String>,
    content_type: Option<String>,
    request_id: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct StubState {
    mode: StubMode,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

struct PasStub {
    base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl PasStub {
    async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }

    async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

async fn spawn_pas_stub(mode: StubMode) -> Result<PasStub> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        mode,
        calls: calls.clone(),
    };
    let app = Router::new()
        .route(
            "/v1/point-alarm-threshold/:node_id",
            get(get_threshold).put(set_threshold).patch(patch_threshold),
        )
        .route(
            "/v1/point-alarm-status/:node_id",
            get(get_alarm_status).put(update_alarm_status),
        )
        .route(
            "/v1/point-alarm-status/:node_id/external",
            put(set_external_alarm_status),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        let _ = server.await;
    });

    Ok(PasStub {
        base_url: format!("http://{addr}"),
        calls,
        shutdown: Some(shutdown_tx),
    })
}

fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn record_call(
    state: &StubState,
    name: &str,
    node_id: String,
    headers: &HeaderMap,
    body: &[u8],
) {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).unwrap_or(Value::Null)
    };
    let mut guard = state.calls.lock().await;
    guard.push(RecordedCall {
        name: name.to_string(),
        node_id,
        authorization: header_value(headers, header::AUTHORIZATION),
        accept: header_value(headers, header::ACCEPT),
        content_type: header_value(headers, header::CONTENT_TYPE),
        request_id: header_value(headers, "x-request-id"),
        body,
    });
}

fn threshold_document(node_id: &str) -> Value {
    json!({
        "nodeId": node_id,
        "thresholdType": 2,
        "overall": {"unit": "gE", "outerHigh": 10.0, "innerHigh": 8.0},
        "fullScale": 20.0,
        "bandAlarms": [{
            "label": "1x",
            "minFrequency": {"valueType": 2, "value": 0.9},
            "maxFrequency": {"valueType": 2, "value": 1.1},
            "overallThreshold": {"unit": "gE", "upperAlert": {"valueType": 1, "value": 0.5}}
        }],
        "halAlarms": [{"label": "hal", "halAlarmType": "GLOBAL", "upperAlert": 2.0}]
    })
}

fn problem(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        body.to_string(),
    )
        .into_response()
}

async fn get_threshold(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_call(&state, "get_threshold", node_id.clone(), &headers, &[]).await;
    match state.mode {
        StubMode::Healthy => Json(threshold_document(&node_id)).into_response(),
        StubMode::Failing => problem(
            StatusCode::NOT_FOUND,
            json!({
                "type": "about:blank",
                "title": "Not Found",
                "status": 404,
                "detail": "no threshold for node",
                "correlationId": "corr-404"
            }),
        ),
    }
}

async fn set_threshold(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record_call(&state, "set_threshold", node_id, &headers, &body).await;
    match state.mode {
        StubMode::Healthy => StatusCode::OK.into_response(),
        StubMode::Failing => problem(
            StatusCode::BAD_REQUEST,
            json!({
                "title": "Bad Request",
                "status": 400,
                "correlationId": "corr-400",
                "reasons": [{"name": "overall.outerHigh", "reason": "must exceed innerHigh"}]
            }),
        ),
    }
}

async fn patch_threshold(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record_call(&state, "patch_threshold", node_id.clone(), &headers, &body).await;
    let mut document = threshold_document(&node_id);
    document["overall"]["outerHigh"] = json!(12.5);
    Json(document).into_response()
}

async fn get_alarm_status(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_call(&state, "get_alarm_status", node_id, &headers, &[]).await;
    match state.mode {
        StubMode::Healthy => Json(json!({
            "status": 3,
            "updatedAt": 1_620_000_000_500_i64,
            "overallAlarm": {"status": 3, "triggeringMeasurement": MEASUREMENT_ID},
            "externalAlarm": {"status": 0, "setBy": USER_ID},
            "bandAlarms": null,
            "halAlarms": [{"label": "hal", "status": 2, "halIndex": 0.4}]
        }))
        .into_response(),
        StubMode::Failing => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
    }
}

async fn update_alarm_status(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record_call(&state, "update_alarm_status", node_id, &headers, &body).await;
    StatusCode::OK.into_response()
}

async fn set_external_alarm_status(
    State(state): State<StubState>,
    Path(node_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record_call(&state, "set_external_alarm_status", node_id, &headers, &body).await;
    StatusCode::OK.into_response()
}

fn node_id() -> Uuid {
    Uuid::parse_str(NODE_ID).expect("valid node id")
}

fn client_for(stub: &PasStub) -> Result<PasClient> {
    Ok(PasClient::new(PasClientConfig::new(stub.base_url.clone()))?
        .with_token_provider(Arc::new(StaticToken::new("token-123"))))
}

#[tokio::test]
async fn threshold_round_trip_against_stub() -> Result<()> {
    let stub = spawn_pas_stub(StubMode::Healthy).await?;
    let client = client_for(&stub)?;

    let threshold = client.get_threshold(node_id()).await?;
    assert_eq!(threshold.node_id, Some(node_id()));
    assert_eq!(threshold.threshold_type, ThresholdType::OverallOutOfWindow);
    assert_eq!(
        threshold.overall.as_ref().and_then(|overall| overall.outer_high),
        Some(10.0)
    );
    assert_eq!(threshold.full_scale, Some(20.0));
    assert_eq!(threshold.band_alarms[0].label, "1x");
    assert_eq!(
        threshold.hal_alarms[0].hal_alarm_type,
        Some(HalAlarmType::Global)
    );

    client.set_threshold(node_id(), &threshold).await?;

    let patched = client
        .patch_threshold(
            node_id(),
            &Patch::new().with(PatchOperation::replace("/overall/outerHigh", json!(12.5))),
        )
        .await?;
    assert_eq!(
        patched.overall.as_ref().and_then(|overall| overall.outer_high),
        Some(12.5)
    );

    let calls = stub.calls().await;
    let names: Vec<&str> = calls.iter().map(|call| call.name.as_str()).collect();
    assert_eq!(names, vec!["get_threshold", "set_threshold", "patch_threshold"]);

    for call in &calls {
        assert_eq!(call.node_id, NODE_ID);
        assert_eq!(call.authorization.as_deref(), Some("Bearer token-123"));
        assert_eq!(call.accept.as_deref(), Some("application/json"));
        assert!(
            call.request_id
                .as_deref()
                .is_some_and(|id| id.starts_with("req_"))
        );
    }

    let put = &calls[1];
    assert_eq!(put.content_type.as_deref(), Some("application/json"));
    assert_eq!(put.body["thresholdType"], json!(2));
    assert_eq!(put.body["overall"]["outerHigh"], json!(10.0));
    assert_eq!(put.body["bandAlarms"][0]["minFrequency"]["valueType"], json!(2));
    assert_eq!(put.body["halAlarms"][0]["halAlarmType"], json!("GLOBAL"));

    let patch = &calls[2];
    assert_eq!(
        patch.content_type.as_deref(),
        Some("application/json-patch+json")
    );
    assert_eq!(
        patch.body,
        json!([{"op": "replace", "path": "/overall/outerHigh", "value": 12.5}])
    );

    stub.stop().await;
    Ok(())
}

#[tokio::test]
async fn alarm_status_operations_against_stub() -> Result<()> {
    let stub = spawn_pas_stub(StubMode::Healthy).await?;
    let client = client_for(&stub)?;

    let status = client.get_alarm_status(node_id()).await?;
    assert_eq!(status.status, AlarmStatusType::Alert);
    assert_eq!(status.updated_at.timestamp_millis(), 1_620_000_000_500);
    assert_eq!(
        status
            .overall
            .and_then(|alarm| alarm.triggering_measurement)
            .map(|id| id.to_string())
            .as_deref(),
        Some(MEASUREMENT_ID)
    );
    assert!(status.band.is_empty());
    assert_eq!(status.hal[0].hal_index, Some(0.4));
    assert_eq!(
        status.external.and_then(|external| external.set_by),
        Some(Uuid::parse_str(USER_ID)?)
    );

    let created_at = Utc
        .with_ymd_and_hms(2021, 5, 3, 10, 15, 0)
        .single()
        .expect("valid timestamp");
    let measurement = Measurement::data_point(
        Uuid::parse_str(MEASUREMENT_ID)?,
        created_at,
        DataPoint {
            coordinate: Coordinate { x: 0.0, y: 4.2 },
            x_unit: "s".to_string(),
            y_unit: "gE".to_string(),
        },
    );
    client.update_alarm_status(node_id(), &measurement).await?;

    client
        .set_external_alarm_status(
            node_id(),
            &ExternalAlarmStatus {
                status: AlarmStatusType::Danger,
                set_by: Some(Uuid::parse_str(USER_ID)?),
            },
        )
        .await?;

    let calls = stub.calls().await;
    let update = calls
        .iter()
        .find(|call| call.name == "update_alarm_status")
        .expect("update call recorded");
    assert_eq!(update.body["contentType"], json!("DATA_POINT"));
    assert_eq!(update.body["createdAt"], json!("2021-05-03T10:15:00.000Z"));
    assert_eq!(update.body["measurementId"], json!(MEASUREMENT_ID));
    assert_eq!(update.body["dataPoint"]["coordinate"]["y"], json!(4.2));

    let external = calls
        .iter()
        .find(|call| call.name == "set_external_alarm_status")
        .expect("external call recorded");
    assert_eq!(external.body, json!({"status": 4, "setBy": USER_ID}));

    stub.stop().await;
    Ok(())
}

#[tokio::test]
async fn problem_documents_surface_as_errors() -> Result<()> {
    let stub = spawn_pas_stub(StubMode::Failing).await?;
    let client = PasClient::new(PasClientConfig::new(stub.base_url.clone()))?;

    let not_found = client
        .get_threshold(node_id())
        .await
        .expect_err("stub answers 404");
    assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));
    let problem = not_found.problem().expect("basic problem");
    assert_eq!(problem.basic().detail, "no threshold for node");
    assert_eq!(problem.correlation_id(), Some("corr-404"));
    assert!(problem.reasons().is_empty());

    let threshold = pas_client::models::Threshold {
        threshold_type: ThresholdType::Inspection,
        ..Default::default()
    };
    let rejected = client
        .set_threshold(node_id(), &threshold)
        .await
        .expect_err("stub answers 400");
    let problem = rejected.problem().expect("validation problem");
    assert_eq!(problem.reasons()[0].name, "overall.outerHigh");
    assert_eq!(problem.reasons()[0].reason, "must exceed innerHigh");

    let server_error = client
        .get_alarm_status(node_id())
        .await
        .expect_err("stub answers 500");
    assert!(matches!(
        server_error,
        PasClientError::Http { status, ref body }
            if status == StatusCode::INTERNAL_SERVER_ERROR && body == "upstream exploded"
    ));

    let calls = stub.calls().await;
    assert!(calls.iter().all(|call| call.authorization.is_none()));

    stub.stop().await;
    Ok(())
}

#[tokio::test]
async fn invalid_requests_never_reach_the_service() -> Result<()> {
    let stub = spawn_pas_stub(StubMode::Healthy).await?;
    let client = client_for(&stub)?;

    let error = client
        .set_external_alarm_status(
            node_id(),
            &ExternalAlarmStatus {
                status: AlarmStatusType::Unknown(7),
                set_by: None,
            },
        )
        .await
        .expect_err("status 7 is out of range");
    match error {
        PasClientError::Validation(validation) => {
            assert_eq!(validation.paths(), vec!["status"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(stub.calls().await.is_empty());

    stub.stop().await;
    Ok(())
}

/// Accepts connections and drops them at once, so every request fails in
/// transport.
async fn spawn_dropping_listener() -> Result<(String, Arc<AtomicUsize>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(socket);
        }
    });

    Ok((format!("http://{addr}"), accepted))
}

#[tokio::test]
async fn transport_failures_retry_idempotent_requests_only() -> Result<()> {
    let (base_url, accepted) = spawn_dropping_listener().await?;
    let client = PasClient::new(PasClientConfig::new(base_url).with_request_attempts(3))?;

    let error = client
        .get_alarm_status(node_id())
        .await
        .expect_err("connection is dropped");
    assert!(matches!(error, PasClientError::Request { .. }));
    assert_eq!(accepted.load(Ordering::SeqCst), 3);

    let error = client
        .patch_threshold(node_id(), &Patch::new().with(PatchOperation::remove("/overall")))
        .await
        .expect_err("connection is dropped");
    assert!(matches!(error, PasClientError::Request { .. }));
    assert_eq!(accepted.load(Ordering::SeqCst), 4);

    Ok(())
}
