//! End-to-end dispatch tests over real TCP connections.

use gee::routing::NOT_FOUND_BODY;
use gee::{handlers, Context, HttpServer, Router, ServerError};
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_root_route() {
    let mut router = Router::new();
    router.get("/", |ctx: &mut Context| ctx.write_str("root"));
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "root");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_hello_echoes_headers() {
    let mut router = Router::new();
    router.get("/hello", handlers::hello);
    let server = common::start_server(router).await;

    let res = common::client()
        .get(server.url("/hello"))
        .header("X-Test", "1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Header[\"X-Test\"] = [\"1\"]"), "{body}");
    assert!(!body.contains("Host"), "{body}");
    assert!(!body.contains("X-Request-Id"), "{body}");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_missing_route_is_404() {
    let server = common::start_server(Router::new()).await;

    let res = common::client()
        .get(server.url("/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), NOT_FOUND_BODY);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_method_is_part_of_match() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let mut router = Router::new();
    router.post("/", move |ctx: &mut Context| {
        counter.fetch_add(1, Ordering::SeqCst);
        ctx.write_str("posted");
    });
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), NOT_FOUND_BODY);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let res = client.post(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_path_match_is_case_sensitive() {
    let mut router = Router::new();
    router.get("/hello", |ctx: &mut Context| ctx.write_str("hello"));
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/Hello")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(server.url("/hello/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The query string is not part of the key.
    let res = client.get(server.url("/hello?x=1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_last_registration_wins() {
    let mut router = Router::new();
    router.get("/", |ctx: &mut Context| ctx.write_str("first"));
    router.get("/", |ctx: &mut Context| ctx.write_str("second"));
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "second");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_handler_sees_peer_address() {
    let mut router = Router::new();
    router.get("/peer", |ctx: &mut Context| {
        let ip = ctx.peer_addr().map(|a| a.ip().to_string()).unwrap_or_default();
        ctx.write_str(&ip);
    });
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/peer")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "127.0.0.1");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let err = HttpServer::new(Router::new(), Default::default())
        .run(&addr)
        .await
        .unwrap_err();
    match err {
        ServerError::Bind { addr: failed, .. } => assert_eq!(failed, addr),
        other => panic!("expected bind error, got {other}"),
    }
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = common::start_server(Router::new()).await;
    let addr = server.addr;
    server.stop().await.unwrap();

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
