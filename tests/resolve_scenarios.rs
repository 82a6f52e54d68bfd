//! End-to-end resolution scenarios over the real plain fetcher.
//!
//! Each test stands up a wiremock server playing the shortener and checks
//! where resolution ends and how many requests it took.

mod helpers;

use helpers::{resolver, test_config, TEST_USER_AGENT};
use link_bypass::error_handling::{ErrorType, InfoType};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn redirect_to(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("Location", location)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_non_shortener_resolves_to_itself() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(html("<p>content</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(5);
    config.shorteners = vec!["bit.ly".to_string()];
    let resolver = resolver(&config);

    let url = format!("{}/article", server.uri());
    assert_eq!(resolver.resolve(&url).await.expect("resolves"), url);
}

#[tokio::test]
async fn test_redirect_to_real_site_stops_there() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc"))
        .respond_with(redirect_to(302, "https://real-site.test/page"))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let resolved = resolver
        .resolve(&format!("{}/abc", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://real-site.test/page");
}

#[tokio::test]
async fn test_meta_refresh_then_http_redirect() {
    let server = MockServer::start().await;
    let second = format!("{}/two", server.uri());
    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html(&format!(
            r#"<html><head><meta http-equiv="refresh" content="0;url={second}"></head></html>"#
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(redirect_to(302, "final.test/z"))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let resolved = resolver
        .resolve(&format!("{}/one", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://final.test/z");
    assert_eq!(resolver.stats().get_info_count(InfoType::MetaRefreshRedirect), 1);
}

#[tokio::test]
async fn test_script_redirect_is_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/js"))
        .respond_with(html(
            r#"<script>setTimeout(function(){ window.location.href = "https://dest.test/js"; }, 0);</script>"#,
        ))
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let resolved = resolver
        .resolve(&format!("{}/js", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://dest.test/js");
}

#[tokio::test]
async fn test_depth_limit_stops_after_exact_hops() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(redirect_to(301, "/b"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(redirect_to(301, "/c"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(redirect_to(301, "https://final.test/"))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(2));
    let state = resolver
        .resolve_traced(&format!("{}/a", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(state.current_url, format!("{}/c", server.uri()));
    assert_eq!(state.hops_taken, 2);
}

#[tokio::test]
async fn test_timeout_on_first_hop_returns_original() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            redirect_to(302, "https://never.test/")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(5);
    config.timeout_seconds = 1;
    let resolver = resolver(&config);

    let url = format!("{}/slow", server.uri());
    assert_eq!(resolver.resolve(&url).await.expect("fails open"), url);
    assert_eq!(
        resolver
            .stats()
            .get_error_count(ErrorType::HttpRequestTimeoutError),
        1
    );
}

#[tokio::test]
async fn test_error_status_keeps_current_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let url = format!("{}/gone", server.uri());
    assert_eq!(resolver.resolve(&url).await.expect("fails open"), url);
    assert_eq!(resolver.stats().get_error_count(ErrorType::HttpRequestNotFound), 1);
}

#[tokio::test]
async fn test_redirect_without_location_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/odd"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let url = format!("{}/odd", server.uri());
    assert_eq!(resolver.resolve(&url).await.expect("resolves"), url);
    assert_eq!(resolver.stats().get_info_count(InfoType::AmbiguousRedirect), 1);
}

#[tokio::test]
async fn test_binary_body_is_not_inspected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            br#"<meta http-equiv="refresh" content="0;url=https://hidden.test/">"#.to_vec(),
            "image/png",
        ))
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let url = format!("{}/image", server.uri());
    assert_eq!(resolver.resolve(&url).await.expect("resolves"), url);
}

#[tokio::test]
async fn test_second_resolve_hits_cache_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc"))
        .respond_with(redirect_to(302, "https://real-site.test/page"))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let url = format!("{}/abc", server.uri());
    let first = resolver.resolve(&url).await.expect("resolves");
    let second = resolver.resolve(&url).await.expect("resolves");

    assert_eq!(first, second);
    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 1);
    assert_eq!(resolver.stats().get_info_count(InfoType::CacheHit), 1);
}

#[tokio::test]
async fn test_requests_carry_pool_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(redirect_to(302, "https://dest.test/ua"))
        .mount(&server)
        .await;

    let resolver = resolver(&test_config(5));
    let resolved = resolver
        .resolve(&format!("{}/ua", server.uri()))
        .await
        .expect("resolves");
    // Wiremock answers 404 when the matcher fails, which would keep the original URL
    assert_eq!(resolved, "https://dest.test/ua");
}
