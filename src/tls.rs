//! TLS client configuration for the exchange REST API.
//!
//! Builds a [`rustls::ClientConfig`] that trusts the Mozilla root set shipped
//! in `webpki-roots`, optionally extended with the certificates of a local
//! PEM bundle (for intercepting proxies and private mirrors).

use std::path::Path;

use rustls::ClientConfig;
use tracing::info;

use crate::Result;

/// Builds a [`ClientConfig`] from the bundled web PKI roots plus any
/// certificates found in `extra_roots`.
///
/// # Errors
///
/// Returns [`TickerboardError::Tls`](crate::TickerboardError::Tls) if the
/// bundle cannot be read, cannot be parsed, or contains no certificates.
pub fn build_tls_config(extra_roots: Option<&Path>) -> Result<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = extra_roots {
        let pem = std::fs::read(path).map_err(|e| {
            crate::TickerboardError::Tls(format!("failed to read {}: {e}", path.display()))
        })?;

        let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| crate::TickerboardError::Tls(format!("failed to parse CA PEM: {e}")))?;

        if certs.is_empty() {
            return Err(crate::TickerboardError::Tls(format!(
                "no certificates found in {}",
                path.display()
            )));
        }

        let (added, ignored) = root_store.add_parsable_certificates(certs);
        info!(added, ignored, bundle = %path.display(), "Loaded extra CA roots");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builds_with_bundled_roots() {
        assert!(build_tls_config(None).is_ok());
    }

    #[test]
    fn missing_bundle_is_an_error() {
        let err = build_tls_config(Some(Path::new("/nonexistent/bundle.pem"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn bundle_without_certificates_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a certificate").unwrap();

        let err = build_tls_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("no certificates found"));
    }
}
