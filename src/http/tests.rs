//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use std::time::{Duration, Instant};
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(base_url: &str, attempts: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .max_retries(attempts)
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.initial_backoff, Duration::from_secs(5));
    assert_eq!(config.max_backoff, Duration::from_secs(120));
    assert_eq!(config.backoff_type, BackoffType::Exponential);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .max_retries(7)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("Accept", "application/json")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 7);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("count", "12")
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(config.query.get("count"), Some(&"12".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[tokio::test]
async fn test_http_client_get_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 1);
    let body = client.get("/api/search").await.unwrap();

    assert_eq!(body, b"hello");
}

#[tokio::test]
async fn test_http_client_request_header_replaces_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(1)
        .header("Origin", "https://default.example.com")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client
        .get_with_config(
            "/api/search",
            RequestConfig::new().header("origin", "https://www.lrytas.lt"),
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let origins: Vec<_> = requests[0]
        .headers
        .get_all("origin")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(origins, vec!["https://www.lrytas.lt"]);
}

#[tokio::test]
async fn test_http_client_invalid_header_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 3);
    let err = client
        .get_with_config("/api/search", RequestConfig::new().header("Bad Header", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("query", "vakcinacija"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 1);
    client
        .get_with_config(
            "/api/search",
            RequestConfig::new()
                .query("query", "vakcinacija")
                .query("page", "2"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .and(header("Origin", "https://www.example.com"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("Origin", "https://www.example.com")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    client
        .get_with_config(
            "/api/data",
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    // First two calls return 500, third succeeds
    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 3);
    let body = client.get("/api/flaky").await.unwrap();

    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_http_client_client_error_counts_toward_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 2);
    let err = client.get("/api/missing").await.unwrap_err();

    match err {
        Error::MaxRetriesExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(matches!(
                *last_error,
                Error::HttpStatus { status: 404, ref body } if body == "Not found"
            ));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_retry_after_overrides_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    // Standard backoff would be 10ms; the hint asks for a full second
    let client = fast_client(&mock_server.uri(), 2);
    let started = Instant::now();
    let body = client.get("/api/limited").await.unwrap();

    assert_eq!(body, b"ok");
    assert!(started.elapsed() >= Duration::from_millis(950));
}

#[tokio::test]
async fn test_http_client_oversized_retry_after_uses_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1e300"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 2);
    let started = Instant::now();
    let body = client.get("/api/limited").await.unwrap();

    assert_eq!(body, b"ok");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_http_client_429_without_hint_is_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 3);
    let err = client.get("/api/limited").await.unwrap_err();

    match err {
        Error::MaxRetriesExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(
                *last_error,
                Error::RateLimited { retry_after: None }
            ));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_429_with_hint_counts_toward_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 4);
    let err = client.get("/api/limited").await.unwrap_err();

    assert!(matches!(
        err,
        Error::MaxRetriesExceeded { attempts: 4, .. }
    ));
}

#[tokio::test]
async fn test_http_client_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 2);
    let err = client
        .get_with_config(
            "/api/slow",
            RequestConfig::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    match err {
        Error::MaxRetriesExceeded { last_error, .. } => {
            assert!(matches!(*last_error, Error::Timeout { timeout_ms: 50 }));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_connection_refused_is_retried() {
    // Nothing listens on port 1
    let client = fast_client("http://127.0.0.1:1", 3);
    let err = client.get("/api/search").await.unwrap_err();

    match err {
        Error::MaxRetriesExceeded {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last_error, Error::Http(_)));
        }
        other => panic!("Expected MaxRetriesExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_zero_budget_still_tries_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server.uri(), 0);
    client.get("/api/data").await.unwrap();
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Client without base URL
    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client = HttpClient::with_config(config).unwrap();

    client
        .get(&format!("{}/api/test", mock_server.uri()))
        .await
        .unwrap();
}

#[test_case(0, 5 ; "first retry waits the base delay")]
#[test_case(1, 10 ; "second retry doubles")]
#[test_case(2, 20 ; "third retry")]
#[test_case(4, 80 ; "fifth retry")]
#[test_case(5, 120 ; "capped at max delay")]
#[test_case(40, 120 ; "overflow saturates to max delay")]
fn test_calculate_backoff_exponential_defaults(attempt: u32, expected_secs: u64) {
    let client = HttpClient::new().unwrap();
    assert_eq!(
        client.calculate_backoff(attempt),
        Duration::from_secs(expected_secs)
    );
}

#[test]
fn test_calculate_backoff_constant() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test_case("10", Some(Duration::from_secs(10)) ; "whole seconds")]
#[test_case("1.5", Some(Duration::from_millis(1500)) ; "decimal seconds")]
#[test_case(" 3 ", Some(Duration::from_secs(3)) ; "surrounding whitespace")]
#[test_case("0", Some(Duration::ZERO) ; "zero")]
#[test_case("-1", None ; "negative")]
#[test_case("inf", None ; "infinite")]
#[test_case("1e300", None ; "too large for a duration")]
#[test_case("Wed, 21 Oct 2015 07:28:00 GMT", None ; "http date")]
fn test_parse_retry_after(raw: &str, expected: Option<Duration>) {
    let mut headers = HeaderMap::new();
    headers.insert(RETRY_AFTER, HeaderValue::from_str(raw).unwrap());
    assert_eq!(parse_retry_after(&headers), expected);
}

#[test]
fn test_parse_retry_after_missing() {
    assert_eq!(parse_retry_after(&HeaderMap::new()), None);
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    for _ in 0..3 {
        client.get("/api/data").await.unwrap();
    }
}
