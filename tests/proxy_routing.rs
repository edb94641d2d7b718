//! End-to-end routing through the proxy.

use std::collections::HashSet;

mod common;

use common::{routes, start_echo_backend, TempConfig, TestProxy};

#[tokio::test]
async fn test_first_policy_forwards_suffix() {
    let h1 = start_echo_backend("h1").await;
    let h2 = start_echo_backend("h2").await;
    let config = TempConfig::new(&routes(
        "first",
        &[format!("http://{}", h1), format!("http://{}", h2)],
    ));
    let proxy = TestProxy::start(&config).await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let res = client.get(proxy.url("/tenantA/v1/svc/items/5")).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "h1 /items/5");
    }
}

#[tokio::test]
async fn test_query_and_empty_suffix() {
    let h1 = start_echo_backend("h1").await;
    let config = TempConfig::new(&routes("first", &[format!("http://{}", h1)]));
    let proxy = TestProxy::start(&config).await;
    let client = reqwest::Client::new();

    let res = client.get(proxy.url("/tenantA/v1/svc/search?q=a%20b")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "h1 /search?q=a%20b");

    let res = client.post(proxy.url("/tenantA/v1/svc/")).body("x").send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "h1 /");

    let res = client.get(proxy.url("/tenantA/v1/svc")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "h1 /");
}

#[tokio::test]
async fn test_random_policy_spreads_over_pool() {
    let a = start_echo_backend("a").await;
    let b = start_echo_backend("b").await;
    let config = TempConfig::new(&routes(
        "random",
        &[format!("http://{}", a), format!("http://{}", b)],
    ));
    let proxy = TestProxy::start(&config).await;
    let client = reqwest::Client::new();

    let mut seen = HashSet::new();
    for _ in 0..60 {
        let body = client.get(proxy.url("/tenantA/v1/svc/x")).send().await.unwrap().text().await.unwrap();
        let name = body.split_whitespace().next().unwrap().to_string();
        assert!(name == "a" || name == "b", "unexpected backend {}", name);
        seen.insert(name);
    }
    assert_eq!(seen.len(), 2);
}

#[tokio::test]
async fn test_unknown_method_with_single_server() {
    let h1 = start_echo_backend("h1").await;
    let config = TempConfig::new(&routes("round", &[format!("http://{}", h1)]));
    let proxy = TestProxy::start(&config).await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let res = client.get(proxy.url("/tenantA/v1/svc/ping")).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "h1 /ping");
    }
}

#[tokio::test]
async fn test_missing_route_is_404() {
    let config = TempConfig::new(&routes("first", &["http://127.0.0.1:1".to_string()]));
    let proxy = TestProxy::start(&config).await;

    let res = reqwest::get(proxy.url("/tenantX/v1/svc/items")).await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_empty_pool_is_500() {
    let config = TempConfig::new(&routes("first", &[]));
    let proxy = TestProxy::start(&config).await;

    let res = reqwest::get(proxy.url("/tenantA/v1/svc/items")).await.unwrap();
    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn test_unreachable_backend_is_500_without_retry() {
    let h1 = start_echo_backend("h1").await;
    let config = TempConfig::new(&routes(
        "first",
        &["http://127.0.0.1:1".to_string(), format!("http://{}", h1)],
    ));
    let proxy = TestProxy::start(&config).await;

    let res = reqwest::get(proxy.url("/tenantA/v1/svc/items")).await.unwrap();
    assert_eq!(res.status(), 500);
    assert!(res.text().await.unwrap().contains("upstream request failed"));
}

#[tokio::test]
async fn test_concurrent_requests() {
    let h1 = start_echo_backend("h1").await;
    let config = TempConfig::new(&routes("first", &[format!("http://{}", h1)]));
    let proxy = TestProxy::start(&config).await;
    let client = reqwest::Client::new();

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = client.clone();
            let url = proxy.url(&format!("/tenantA/v1/svc/item/{}", i));
            tokio::spawn(async move { client.get(url).send().await.unwrap().text().await.unwrap() })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), format!("h1 /item/{}", i));
    }
    assert_eq!(proxy.manager.cache().len(), 1);
}
