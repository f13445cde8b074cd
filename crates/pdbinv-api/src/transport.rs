// Transport configuration for building reqwest::Client instances.
//
// One client is built per configured PuppetDB server. TLS servers get a
// client identity plus a private trust root; plain servers get neither.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// PEM files used for mutual TLS against a PuppetDB server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTls {
    /// CA bundle the server certificate must chain to.
    pub ca_cert: PathBuf,
    /// Client certificate presented to the server.
    pub cert: PathBuf,
    /// Private key matching `cert`.
    pub key: PathBuf,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: Option<ClientTls>,
    pub keep_alive: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: None,
            keep_alive: Duration::from_secs(60),
        }
    }
}

impl TransportConfig {
    /// Plain HTTP transport.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Mutual TLS transport.
    pub fn with_tls(tls: ClientTls) -> Self {
        Self {
            tls: Some(tls),
            ..Self::default()
        }
    }

    /// URL scheme matching this transport.
    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() { "https" } else { "http" }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .tcp_keepalive(self.keep_alive)
            .pool_idle_timeout(self.keep_alive)
            .user_agent(concat!("pdbinv/", env!("CARGO_PKG_VERSION")));

        if let Some(ref tls) = self.tls {
            let ca_pem = read_pem(&tls.ca_cert, "CA bundle")?;
            let roots = reqwest::Certificate::from_pem_bundle(&ca_pem)
                .map_err(|e| Error::Tls(format!("invalid CA bundle: {e}")))?;

            // rustls wants the certificate chain and the key in one PEM buffer.
            let mut identity_pem = read_pem(&tls.cert, "client certificate")?;
            identity_pem.push(b'\n');
            identity_pem.extend(read_pem(&tls.key, "client key")?);
            let identity = reqwest::Identity::from_pem(&identity_pem)
                .map_err(|e| Error::Tls(format!("invalid client identity: {e}")))?;

            builder = builder
                .use_rustls_tls()
                .tls_built_in_root_certs(false)
                .identity(identity);
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>, Error> {
    std::fs::read(path)
        .map_err(|e| Error::Tls(format!("failed to read {what} {}: {e}", path.display())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scheme_follows_tls_flag() {
        assert_eq!(TransportConfig::plain().scheme(), "http");

        let tls = TransportConfig::with_tls(ClientTls {
            ca_cert: "ca.pem".into(),
            cert: "node.pem".into(),
            key: "node.key".into(),
        });
        assert_eq!(tls.scheme(), "https");
    }

    #[test]
    fn missing_pem_is_tls_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = TransportConfig::with_tls(ClientTls {
            ca_cert: dir.path().join("absent-ca.pem"),
            cert: dir.path().join("absent.pem"),
            key: dir.path().join("absent.key"),
        });

        let err = config.build_client().unwrap_err();
        assert!(
            matches!(err, Error::Tls(ref msg) if msg.contains("CA bundle")),
            "expected Tls error, got: {err:?}"
        );
    }

    #[test]
    fn garbage_ca_bundle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ca = dir.path().join("ca.pem");
        std::fs::write(&ca, "-----BEGIN CERTIFICATE-----\nnot base64!\n-----END CERTIFICATE-----\n")
            .unwrap();
        let config = TransportConfig::with_tls(ClientTls {
            ca_cert: ca,
            cert: dir.path().join("node.pem"),
            key: dir.path().join("node.key"),
        });

        assert!(matches!(config.build_client(), Err(Error::Tls(_))));
    }
}
