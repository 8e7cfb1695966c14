//! HTTP probe tests against a local axum server producing redirect chains.
//!
//! The root answers with a redirect to a per-test location. Each request to
//! /redirect/{hop} answers with a redirect to /redirect/{hop - 1}; hop 0 is
//! the final page.

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use squat_verify::config::MAX_REDIRECT_HOPS;
use squat_verify::fetch::probe_http;
use squat_verify::initialization::init_probe_client;
use squat_verify::{ErrorType, InfoType, ProbeContext, ProcessingStats, VerifyConfig};

/// Starts the redirect server and returns its `host:port` and the number of
/// /redirect/{hop} requests served.
async fn start_redirect_server(root_location: &'static str) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/",
            get(move || async move { Redirect::temporary(root_location).into_response() }),
        )
        .route(
            "/redirect/{hop}",
            get({
                let hits = Arc::clone(&hits);
                move |Path(hop): Path<usize>| async move {
                    hits.fetch_add(1, Ordering::Relaxed);
                    if hop > 0 {
                        Redirect::temporary(&format!("/redirect/{}", hop - 1)).into_response()
                    } else {
                        ([(header::SERVER, "squat-test")], "Final Destination").into_response()
                    }
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr.to_string(), hits)
}

fn follow() -> VerifyConfig {
    VerifyConfig {
        do_http: true,
        follow_redirects: true,
        http_timeout: Duration::from_secs(5),
        ..VerifyConfig::default()
    }
}

#[tokio::test]
async fn test_redirect_chain_stops_at_hop_limit() {
    let (host, hits) = start_redirect_server("/redirect/12").await;
    let client = init_probe_client().unwrap();
    let stats = ProcessingStats::new();

    let result = probe_http(
        &client,
        &host,
        false,
        &ProbeContext::background(),
        &follow(),
        &stats,
    )
    .await;

    assert!(result.attempted);
    assert_eq!(result.url, format!("http://{host}/"));
    assert_eq!(result.redirect_chain.len(), MAX_REDIRECT_HOPS);
    assert_eq!(
        result.redirect_chain.first().map(String::as_str),
        Some(format!("http://{host}/redirect/12").as_str())
    );
    assert_eq!(result.status_code, 307);
    assert_eq!(result.status, "307 Temporary Redirect");
    assert_eq!(stats.get_error_count(ErrorType::RedirectLimitExceeded), 1);
    assert_eq!(
        stats.get_info_count(InfoType::HttpRedirect),
        MAX_REDIRECT_HOPS
    );
    assert_eq!(hits.load(Ordering::Relaxed), MAX_REDIRECT_HOPS);
}

#[tokio::test]
async fn test_short_chain_reaches_final_page() {
    let (host, _) = start_redirect_server("/redirect/2").await;
    let client = init_probe_client().unwrap();
    let stats = ProcessingStats::new();

    let ctx = ProbeContext::background().with_timeout(Duration::from_secs(10));
    let result = probe_http(&client, &host, false, &ctx, &follow(), &stats).await;

    assert_eq!(result.status_code, 200);
    assert_eq!(result.status, "200 OK");
    assert_eq!(result.server, "squat-test");
    assert_eq!(
        result.redirect_chain,
        vec![
            format!("http://{host}/redirect/2"),
            format!("http://{host}/redirect/1"),
            format!("http://{host}/redirect/0"),
        ]
    );
    assert_eq!(stats.get_error_count(ErrorType::RedirectLimitExceeded), 0);
}

#[tokio::test]
async fn test_without_follow_only_first_response_is_kept() {
    let (host, hits) = start_redirect_server("/redirect/12").await;
    let client = init_probe_client().unwrap();
    let stats = ProcessingStats::new();
    let cfg = VerifyConfig {
        follow_redirects: false,
        ..follow()
    };

    let result = probe_http(
        &client,
        &host,
        false,
        &ProbeContext::background(),
        &cfg,
        &stats,
    )
    .await;

    assert_eq!(result.status_code, 307);
    assert_eq!(result.location, "/redirect/12");
    assert!(result.redirect_chain.is_empty());
    assert_eq!(hits.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_failed_hop_is_a_transport_failure() {
    let (host, _) = start_redirect_server("http://redirect.invalid/").await;
    let client = init_probe_client().unwrap();
    let stats = ProcessingStats::new();

    let result = probe_http(
        &client,
        &host,
        false,
        &ProbeContext::background(),
        &follow(),
        &stats,
    )
    .await;

    assert!(result.attempted);
    assert_eq!(result.url, format!("http://{host}/"));
    assert_eq!(result.status_code, 0);
    assert!(result.redirect_chain.is_empty());
    assert_eq!(stats.get_error_count(ErrorType::HttpTransportFailure), 1);
}
