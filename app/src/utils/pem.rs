use anyhow::{Context, Result};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls_pemfile::{certs, private_key};

pub struct PemUtils {}

impl PemUtils {
    pub fn parse_certificate(data: Vec<u8>) -> Result<CertificateDer<'static>> {
        certs(&mut &data[..])
            .find_map(|cert_res| cert_res.ok())
            .context("Failed to parse certificate")
    }

    /// First PKCS#1, PKCS#8 or SEC1 key found in the PEM data.
    pub fn parse_private_key(data: Vec<u8>) -> Result<PrivateKeyDer<'static>> {
        private_key(&mut &data[..])
            .context("Failed to read private key")?
            .context("Failed to parse any valid private key")
    }
}
