//! TLS probe tests.

use super::*;
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;

const CERT: &[u8] = include_bytes!("../../tests/fixtures/expired_self_signed.der");
const KEY: &[u8] = include_bytes!("../../tests/fixtures/expired_self_signed.key.der");

fn ctx() -> ProbeContext {
    ProbeContext::background().with_timeout(Duration::from_secs(3))
}

/// Serves the expired self-signed fixture certificate on an ephemeral port.
async fn spawn_tls_server() -> u16 {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let key = PrivateKeyDer::try_from(KEY.to_vec()).unwrap();
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![CertificateDer::from(CERT.to_vec())], key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((sock, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let _ = acceptor.accept(sock).await;
            });
        }
    });
    port
}

#[tokio::test]
async fn test_expired_self_signed_certificate_connects() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let port = spawn_tls_server().await;

    let result = probe_tls_on_port(&connector, "127.0.0.1", port, &ctx(), &stats).await;

    assert!(result.connected);
    assert_eq!(result.server_name, "127.0.0.1");
    assert_eq!(result.common_name, "squat.test");
    assert_eq!(result.dns_names, ["squat.test", "www.squat.test"]);
    assert_eq!(result.serial_number, "4242424242");
    assert!(result.not_after < Some(Utc::now()));
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = probe_tls_on_port(&connector, "127.0.0.1", port, &ctx(), &stats).await;

    assert_eq!(result, TlsResult::unconnected("127.0.0.1"));
    assert_eq!(stats.get_error_count(ErrorType::TlsUnreachable), 1);
}

#[tokio::test]
async fn test_plain_tcp_server_fails_handshake() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Accept and hang up without speaking TLS
        while let Ok((sock, _)) = listener.accept().await {
            drop(sock);
        }
    });

    let result = probe_tls_on_port(&connector, "127.0.0.1", port, &ctx(), &stats).await;

    assert!(!result.connected);
    assert!(result.issuer.is_empty());
    assert!(result.not_before.is_none());
    assert_eq!(stats.get_error_count(ErrorType::TlsHandshakeFailure), 1);
}

#[tokio::test]
async fn test_canceled_context_skips_dial() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let token = CancellationToken::new();
    token.cancel();
    let ctx = ProbeContext::new(token).with_timeout(Duration::from_secs(3));

    let result = probe_tls_on_port(&connector, "127.0.0.1", 9, &ctx, &stats).await;

    assert!(!result.connected);
    assert_eq!(stats.total_errors(), 0);
}

#[tokio::test]
async fn test_cancel_during_handshake_is_not_a_failure() {
    // Accepts connections and never answers the ClientHello
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });
    let ctx = ProbeContext::new(token).with_timeout(Duration::from_secs(3));

    let result = probe_tls_on_port(&connector, "127.0.0.1", port, &ctx, &stats).await;

    assert!(!result.connected);
    assert!(ctx.is_canceled());
    assert_eq!(stats.total_errors(), 0);
}

#[test]
fn test_unconnected_result_serialization() {
    let json = serde_json::to_value(TlsResult::unconnected("squat.test")).unwrap();
    assert_eq!(json["Connected"], false);
    assert_eq!(json["ServerName"], "squat.test");
    assert!(json["NotBefore"].is_null());
    assert_eq!(json["SerialNumber"], "");

    let back: TlsResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, TlsResult::unconnected("squat.test"));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_self_signed_certificate() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let result = probe_tls(&connector, "self-signed.badssl.com", &ctx(), &stats).await;
    assert!(result.connected);
    assert!(!result.issuer.is_empty());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_expired_certificate() {
    let connector = build_connector().unwrap();
    let stats = ProcessingStats::new();
    let result = probe_tls(&connector, "expired.badssl.com", &ctx(), &stats).await;
    assert!(result.connected);
    assert!(result.not_after < Some(Utc::now()));
    assert!(result.serial_number.chars().all(|c| c.is_ascii_digit()));
}
