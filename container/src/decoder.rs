use openssl::{
    pkcs12::Pkcs12,
    pkey::{PKey, Private},
    stack::Stack,
    x509::X509,
};

use crate::errors::{Error, Result};

/// Raw artifacts produced by one pass through the cryptographic engine.
///
/// Each field is moved out of the engine's parse result; anything the
/// extractor does not transfer into the container model is dropped, and
/// with it the underlying engine handle.
pub(crate) struct DecodedArtifacts {
    pub(crate) private_key: Option<PKey<Private>>,
    pub(crate) certificate: Option<X509>,
    pub(crate) ca_stack: Option<Stack<X509>>,
}

/// Decode `der` as a PKCS#12 container and decrypt it with `password`.
///
/// DER framing failures map to [`Error::MalformedContainer`]; decryption
/// and MAC verification failures (wrong password, tampered content) map to
/// [`Error::AuthenticationFailure`], carrying the engine diagnostics.
pub(crate) fn decode(der: &[u8], password: &str) -> Result<DecodedArtifacts> {
    log::trace!("Decoding PKCS#12 container, {} bytes", der.len());

    let pkcs12 = Pkcs12::from_der(der).map_err(Error::MalformedContainer)?;
    let parsed = pkcs12
        .parse2(password)
        .map_err(Error::AuthenticationFailure)?;

    log::trace!(
        "Container decoded: key present: {}, certificate present: {}, CA certificates: {}",
        parsed.pkey.is_some(),
        parsed.cert.is_some(),
        parsed.ca.as_ref().map(|ca| ca.len()).unwrap_or(0)
    );

    Ok(DecodedArtifacts {
        private_key: parsed.pkey,
        certificate: parsed.cert,
        ca_stack: parsed.ca,
    })
}
