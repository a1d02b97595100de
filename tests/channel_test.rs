//! Secure-channel pinning integration tests
//!
//! Spins up bare TLS listeners presenting various certificates and checks
//! that the pinned-CA channel refuses everything that does not chain to the
//! supplied trust anchor and match the server name.

mod common;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_rustls::rustls::{Certificate, PrivateKey, ServerConfig};
use tokio_rustls::TlsAcceptor;

use wicket::{dial, TlsPinPolicy, WicketError};

use common::generate_pki;

/// Accept TLS connections with the given certificate until the test ends.
/// Handshake failures on the server side are expected and ignored.
async fn spawn_tls_listener(cert_der: Vec<u8>, key_der: Vec<u8>) -> String {
    let config = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(vec![Certificate(cert_der)], PrivateKey(key_der))
        .expect("server tls config");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let _ = acceptor.accept(stream).await;
            });
        }
    });

    format!("localhost:{}", addr.port())
}

/// A peer presenting a certificate from a different CA must be rejected —
/// no connection silently succeeds with an untrusted peer.
#[tokio::test]
async fn test_dial_rejects_unpinned_ca() {
    let trusted = generate_pki("peer");
    let imposter = generate_pki("imposter");

    let endpoint = spawn_tls_listener(imposter.user_cert_der, imposter.user_key_der).await;
    let channel = dial(
        &endpoint,
        trusted.ca_cert_pem.as_bytes(),
        &TlsPinPolicy::default(),
    )
    .unwrap();

    let err = channel.probe().await.unwrap_err();
    match err {
        WicketError::ChannelEstablishment { endpoint: e, .. } => assert_eq!(e, endpoint),
        other => panic!("expected channel error, got {other}"),
    }
}

/// A certificate that chains to the pinned CA but names a different host is
/// rejected by the strict server-name check.
#[tokio::test]
async fn test_dial_rejects_wrong_server_name() {
    let pki = generate_pki("peer");

    let endpoint = spawn_tls_listener(pki.user_cert_der, pki.user_key_der).await;
    // The listener certificate carries SAN "localhost"; pin the CA but
    // require a different server name.
    let policy = TlsPinPolicy {
        server_name: Some("peer0.example.com".to_string()),
    };
    let channel = dial(&endpoint, pki.ca_cert_pem.as_bytes(), &policy).unwrap();

    assert!(channel.probe().await.is_err());
}

/// Lazy dial never touches the network: constructing a channel toward a dead
/// endpoint succeeds, and only probe reports the failure.
#[tokio::test]
async fn test_lazy_dial_defers_connection_failure() {
    let pki = generate_pki("peer");

    let channel = dial(
        "localhost:1", // nothing listens here
        pki.ca_cert_pem.as_bytes(),
        &TlsPinPolicy::default(),
    )
    .unwrap();

    let err = channel.probe().await.unwrap_err();
    assert!(matches!(err, WicketError::ChannelEstablishment { .. }));
}
