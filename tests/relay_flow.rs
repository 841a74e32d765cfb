//! End-to-end tests: collectd batch in, InfluxDB series batch out
//!
//! Runs the real router against a mock InfluxDB bound to an ephemeral port
//! and checks the exact bytes that arrive at the destination.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use silta::relay::InfluxRelay;
use silta::server;
use tokio::sync::Mutex;

/// Captured traffic at the mock destination
#[derive(Default)]
struct MockInfluxState {
    bodies: Mutex<Vec<String>>,
    requests: AtomicUsize,
}

/// Start a mock InfluxDB answering `status`, returns its address and state
async fn start_mock_influx(status: StatusCode) -> (SocketAddr, Arc<MockInfluxState>) {
    let state = Arc::new(MockInfluxState::default());

    let app = Router::new().route(
        "/db/events/series",
        post({
            let state = Arc::clone(&state);
            move |body: String| {
                let state = Arc::clone(&state);
                async move {
                    state.requests.fetch_add(1, Ordering::Relaxed);
                    state.bodies.lock().await.push(body);
                    status
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

/// Start silta on an ephemeral port, relaying to `influx_addr`
async fn start_silta(influx_addr: SocketAddr) -> SocketAddr {
    let url = format!("http://{}/db/events/series?u=data&p=data", influx_addr);
    let relay = Arc::new(InfluxRelay::new(url).unwrap());
    let app = server::router(relay);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_single_sample_end_to_end() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body(r#"[{"host":"h1","plugin":"mem","type":"used","dsnames":["value"],"values":[123.4]}]"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let bodies = state.bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        r#"[{"name":"events","columns":["host","key","value"],"points":[["h1","mem.used.value",123.4]]}]"#
    );
}

#[tokio::test]
async fn test_multi_value_samples_flatten_in_order() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    let batch = r#"[
        {"host":"h1","plugin":"cpu","plugin_instance":"0","type":"idle","dsnames":["value"],"values":[99.5]},
        {"host":"h1","plugin":"if","plugin_instance":"eth0","type":"if_octets","dsnames":["rx","tx"],"values":[1.0,2.0]}
    ]"#;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body(batch)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let bodies = state.bodies.lock().await;
    let payload: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    let series = &payload[0];
    assert_eq!(series["name"], "events");
    assert_eq!(
        series["columns"],
        serde_json::json!(["host", "key", "value"])
    );
    assert_eq!(
        series["points"],
        serde_json::json!([
            ["h1", "cpu.0.idle.value", 99.5],
            ["h1", "if.eth0.if_octets.rx", 1.0],
            ["h1", "if.eth0.if_octets.tx", 2.0],
        ])
    );
}

#[tokio::test]
async fn test_identical_inputs_relay_identical_bytes() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    let batch = r#"[{"host":"h1","plugin":"load","type":"load","dsnames":["shortterm","midterm"],"values":[0.5,0.25]}]"#;
    let client = reqwest::Client::new();
    for _ in 0..2 {
        let response = client
            .post(format!("http://{}/", silta_addr))
            .body(batch)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    let bodies = state.bodies.lock().await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_malformed_body_answers_400_and_relays_nothing() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body("this is not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(state.requests.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_shape_mismatch_answers_400_and_relays_nothing() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    // Two values, one name: the whole batch aborts, no partial relay
    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body(r#"[{"host":"h1","plugin":"cpu","dsnames":["value"],"values":[1.0,2.0]}]"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(state.requests.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_unreachable_destination_answers_502() {
    // Port 1 refuses connections
    let influx_addr: SocketAddr = "127.0.0.1:1".parse().unwrap();
    let silta_addr = start_silta(influx_addr).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body(r#"[{"host":"h1","plugin":"mem","type":"used","dsnames":["value"],"values":[1.0]}]"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_destination_5xx_still_acknowledged() {
    let (influx_addr, state) = start_mock_influx(StatusCode::INTERNAL_SERVER_ERROR).await;
    let silta_addr = start_silta(influx_addr).await;

    // Fire-and-forget: the inbound caller sees success once the POST went out
    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body(r#"[{"host":"h1","plugin":"mem","type":"used","dsnames":["value"],"values":[1.0]}]"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(state.requests.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_empty_batch_relays_empty_series() {
    let (influx_addr, state) = start_mock_influx(StatusCode::OK).await;
    let silta_addr = start_silta(influx_addr).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/", silta_addr))
        .body("[]")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let bodies = state.bodies.lock().await;
    assert_eq!(
        bodies[0],
        r#"[{"name":"events","columns":["host","key","value"],"points":[]}]"#
    );
}
