//! Shared test fixtures: generated PKI material and network profiles.

// Not every test binary touches every fixture field.
#![allow(dead_code)]

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};

/// A self-contained test PKI: one CA, one user certificate/key signed by it.
pub struct TestPki {
    pub ca_cert_pem: String,
    pub ca_cert_der: Vec<u8>,
    pub user_cert_pem: String,
    pub user_key_pem: String,
    pub user_cert_der: Vec<u8>,
    pub user_key_der: Vec<u8>,
}

/// Generate a CA plus a `localhost` end-entity certificate signed by it.
/// Keys are ECDSA P-256, the usual ledger user-key algorithm.
pub fn generate_pki(common_name: &str) -> TestPki {
    let ca_key = KeyPair::generate().expect("ca key");
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).expect("ca params");
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params
        .distinguished_name
        .push(DnType::CommonName, format!("{common_name}-ca"));
    let ca_cert = ca_params.self_signed(&ca_key).expect("ca cert");

    let user_key = KeyPair::generate().expect("user key");
    let mut user_params =
        CertificateParams::new(vec!["localhost".to_string()]).expect("user params");
    user_params
        .distinguished_name
        .push(DnType::CommonName, common_name.to_string());
    let user_cert = user_params
        .signed_by(&user_key, &ca_cert, &ca_key)
        .expect("user cert");

    TestPki {
        ca_cert_pem: ca_cert.pem(),
        ca_cert_der: ca_cert.der().to_vec(),
        user_cert_pem: user_cert.pem(),
        user_key_pem: user_key.serialize_pem(),
        user_cert_der: user_cert.der().to_vec(),
        user_key_der: user_key.serialize_der(),
    }
}

/// Render a connection profile with one organization, one user, and a peer
/// list, in the shape `resolve_peer`/`resolve_user` expect.
pub fn profile_yaml(
    msp_id: &str,
    user: &str,
    peers: &[&str],
    peer_url: &str,
    ca_pem: &str,
    cert_pem: Option<&str>,
    key_pem: Option<&str>,
) -> String {
    let mut users = serde_json::Map::new();
    let mut user_entry = serde_json::Map::new();
    if let Some(cert) = cert_pem {
        user_entry.insert(
            "cert".to_string(),
            serde_json::json!({ "pem": cert }),
        );
    }
    if let Some(key) = key_pem {
        user_entry.insert("key".to_string(), serde_json::json!({ "pem": key }));
    }
    users.insert(user.to_string(), serde_json::Value::Object(user_entry));

    let mut peer_entries = serde_json::Map::new();
    for name in peers {
        peer_entries.insert(
            name.to_string(),
            serde_json::json!({
                "url": peer_url,
                "tlsCACerts": { "pem": ca_pem },
            }),
        );
    }

    let profile = serde_json::json!({
        "organizations": {
            msp_id: {
                "peers": peers,
                "users": serde_json::Value::Object(users),
            }
        },
        "peers": serde_json::Value::Object(peer_entries),
    });

    serde_yaml::to_string(&profile).expect("profile yaml")
}
