//! End-to-end dispatch tests: redirects, rewrites, origin fallback and the
//! error boundary, through a real listener.

use std::net::SocketAddr;
use std::time::Duration;

use rewrite_proxy::config::{ProxyConfig, RedirectRule, RewriteRule};
use rewrite_proxy::http::HttpServer;

mod common;

async fn start_proxy(config: ProxyConfig) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn redirect_rule_returns_307_with_location() {
    let mut config = ProxyConfig::default();
    config.redirects.push(RedirectRule {
        source: "/redirect".into(),
        destination: "https://news.example.com/".into(),
        permanent: false,
    });
    let proxy = start_proxy(config).await;

    let res = client()
        .get(format!("http://{proxy}/redirect"))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 307);
    assert_eq!(
        res.headers()["location"].to_str().unwrap(),
        "https://news.example.com/"
    );
}

#[tokio::test]
async fn permanent_redirect_returns_308() {
    let mut config = ProxyConfig::default();
    config.redirects.push(RedirectRule {
        source: "/moved/:id".into(),
        destination: "https://example.com/items/:id".into(),
        permanent: true,
    });
    let proxy = start_proxy(config).await;

    let res = client()
        .get(format!("http://{proxy}/moved/42"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 308);
    assert_eq!(
        res.headers()["location"].to_str().unwrap(),
        "https://example.com/items/42"
    );
}

#[tokio::test]
async fn first_declared_redirect_wins() {
    let mut config = ProxyConfig::default();
    config.redirects.push(RedirectRule {
        source: "/dup".into(),
        destination: "https://first.example.com/".into(),
        permanent: false,
    });
    config.redirects.push(RedirectRule {
        source: "/dup".into(),
        destination: "https://second.example.com/".into(),
        permanent: false,
    });
    let proxy = start_proxy(config).await;

    let res = client().get(format!("http://{proxy}/dup")).send().await.unwrap();

    assert_eq!(
        res.headers()["location"].to_str().unwrap(),
        "https://first.example.com/"
    );
}

#[tokio::test]
async fn rewrite_forwards_with_substituted_path() {
    let (backend, recorded) = common::start_recording_backend("backend-2").await;

    let mut config = ProxyConfig::default();
    config.rewrites.push(RewriteRule {
        source: "/subdirectory/:path*".into(),
        destination: format!("http://{backend}/:path*"),
    });
    let proxy = start_proxy(config).await;

    let res = client()
        .get(format!("http://{proxy}/subdirectory/a/b"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "backend-2");

    let heads = recorded.lock().unwrap();
    assert!(heads[0].starts_with("GET /a/b HTTP/1.1"), "got: {}", heads[0]);
}

#[tokio::test]
async fn forwarding_injects_the_three_headers() {
    let (backend, recorded) = common::start_recording_backend("ok").await;

    let mut config = ProxyConfig::default();
    config.rewrites.push(RewriteRule {
        source: "/api/:rest*".into(),
        destination: format!("http://{backend}/:rest*"),
    });
    let proxy = start_proxy(config).await;

    client()
        .get(format!("http://{proxy}/api/ping"))
        .header("cf-connecting-ip", "203.0.113.9")
        .send()
        .await
        .unwrap();

    assert!(common::recorded_contains(&recorded, "x-forwarded-for: 203.0.113.9"));
    assert!(common::recorded_contains(&recorded, &format!("x-forwarded-host: {proxy}")));
    assert!(common::recorded_contains(&recorded, "x-forwarded-proto: https"));
}

#[tokio::test]
async fn origin_fallback_joins_the_base_path() {
    let (backend, recorded) = common::start_recording_backend("origin").await;

    let mut config = ProxyConfig::default();
    config.origin = Some(format!("http://{backend}/base"));
    let proxy = start_proxy(config).await;

    let res = client().get(format!("http://{proxy}/page")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "origin");
    let heads = recorded.lock().unwrap();
    assert!(heads[0].starts_with("GET /base/page HTTP/1.1"), "got: {}", heads[0]);
}

#[tokio::test]
async fn rewrite_is_preferred_over_origin() {
    let rewrite_backend = common::start_mock_backend("rewrite").await;
    let origin_backend = common::start_mock_backend("origin").await;

    let mut config = ProxyConfig::default();
    config.origin = Some(format!("http://{origin_backend}"));
    config.rewrites.push(RewriteRule {
        source: "/special".into(),
        destination: format!("http://{rewrite_backend}/special"),
    });
    let proxy = start_proxy(config).await;

    let res = client()
        .get(format!("http://{proxy}/special"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "rewrite");

    let res = client()
        .get(format!("http://{proxy}/other"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "origin");
}

#[tokio::test]
async fn unmatched_request_without_origin_is_404() {
    let proxy = start_proxy(ProxyConfig::default()).await;

    let res = client().get(format!("http://{proxy}/nowhere")).send().await.unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn broken_destination_collapses_to_500() {
    let mut config = ProxyConfig::default();
    config.rewrites.push(RewriteRule {
        source: "/broken".into(),
        destination: "not-a-url".into(),
    });
    let proxy = start_proxy(config).await;

    let res = client().get(format!("http://{proxy}/broken")).send().await.unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn unreachable_upstream_collapses_to_500() {
    // Bind-then-drop to obtain a port with no listener behind it.
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let mut config = ProxyConfig::default();
    config.rewrites.push(RewriteRule {
        source: "/gone".into(),
        destination: format!("http://{dead_addr}/"),
    });
    let proxy = start_proxy(config).await;

    let res = client().get(format!("http://{proxy}/gone")).send().await.unwrap();

    assert_eq!(res.status(), 500);
}
