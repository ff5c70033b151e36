use std::sync::Arc;

use serbench_api_server::{router, ServeMode};
use serbench_codecs::default_codecs;
use serbench_engine::generate;

async fn spawn_server(mode: ServeMode, count: usize) -> String {
    let payload = Arc::new(generate(count).unwrap());
    let codecs = default_codecs().unwrap();
    let app = router(payload, codecs, mode).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn each_codec_route_serves_a_decodable_body() {
    let base = spawn_server(ServeMode::RoundTrip, 5000).await;
    let client = reqwest::Client::new();

    for codec in default_codecs().unwrap() {
        let resp = client
            .get(format!("{base}/api/{}", codec.name()))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200, "{}", codec.name());
        assert_eq!(resp.headers()["content-type"], codec.content_type());
        assert_eq!(resp.headers()["cache-control"], "no-store");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");

        let body = resp.bytes().await.unwrap();
        let decoded = codec.decode(&body).unwrap();
        assert_eq!(decoded.records.len(), 5000);
        assert_eq!(decoded.records[0].id, 1);
    }
}

#[tokio::test]
async fn transport_only_mode_serves_identical_bytes_per_request() {
    let base = spawn_server(ServeMode::TransportOnly, 100).await;
    let client = reqwest::Client::new();

    let first = client.get(format!("{base}/api/msgpack")).send().await.unwrap();
    assert_eq!(first.status(), 200);
    let first = first.bytes().await.unwrap();

    let second = client.get(format!("{base}/api/msgpack")).send().await.unwrap();
    let second = second.bytes().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_codec_is_not_found() {
    let base = spawn_server(ServeMode::RoundTrip, 10).await;
    let resp = reqwest::get(format!("{base}/api/protobuf")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn root_serves_a_status_line() {
    let base = spawn_server(ServeMode::RoundTrip, 10).await;
    let resp = reqwest::get(&base).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("serbench"));
}
