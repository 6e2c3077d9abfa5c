use std::fs;
use std::io::Read;
use std::path::Path;

use openssl::{
    pkey::{PKey, PKeyRef, Private},
    x509::{X509, X509Ref},
};

use crate::{
    chain::CaChain,
    decoder::{self, DecodedArtifacts},
    errors::Result,
};

/// An opened PKCS#12 (PFX) credential container.
///
/// Construction runs the full decode, decrypt and MAC-verify sequence and
/// either yields a fully extracted container or fails; no partially loaded
/// container is ever observable. The container owns its private key, leaf
/// certificate and CA certificates for its whole lifetime.
///
/// A container may legally hold no private key (certificate-only bundles):
/// check [`has_private_key`](Self::has_private_key) and
/// [`has_certificate`](Self::has_certificate) before using the respective
/// slot. The leaf certificate slot is only populated when the container
/// yielded a matching key and certificate pair.
///
/// The type is deliberately not `Clone`: the private key must never end up
/// with two independently destructible owners. Load the source bytes again
/// to obtain a second container.
#[derive(Debug)]
pub struct PfxContainer {
    private_key: Option<PKey<Private>>,
    certificate: Option<X509>,
    ca_chain: CaChain,
    friendly_name: String,
}

impl PfxContainer {
    /// Loads a container from DER bytes. `password` may be empty for
    /// unencrypted containers or containers protected by an empty password.
    pub fn from_der(der: &[u8], password: &str) -> Result<Self> {
        let artifacts = decoder::decode(der, password)?;
        Ok(Self::extract(artifacts))
    }

    /// Loads a container from a reader. The reader is drained before any
    /// decoding starts; there is no streaming decode.
    pub fn from_reader<R: Read>(mut reader: R, password: &str) -> Result<Self> {
        let mut der = Vec::new();
        reader.read_to_end(&mut der)?;
        Self::from_der(&der, password)
    }

    /// Loads a container from a file.
    pub fn from_file<P: AsRef<Path>>(path: P, password: &str) -> Result<Self> {
        let der = fs::read(path)?;
        Self::from_der(&der, password)
    }

    /// Builds the owned model from decoded artifacts.
    ///
    /// The leaf slot is populated only for a complete key and certificate
    /// pair; a lone key or lone certificate leaves it cleared. The CA list
    /// is copied out unconditionally, so certificate-only bundles still
    /// surface every included certificate. Engine handles not transferred
    /// here are dropped on return.
    fn extract(artifacts: DecodedArtifacts) -> Self {
        let DecodedArtifacts {
            private_key,
            certificate,
            ca_stack,
        } = artifacts;

        let ca_chain = CaChain::from_stack(ca_stack);

        let (certificate, friendly_name) = match (private_key.is_some(), certificate) {
            (true, Some(certificate)) => {
                // The engine transfers the safe bag's friendlyName attribute
                // onto the leaf certificate as its alias.
                let friendly_name = certificate
                    .alias()
                    .map(|alias| String::from_utf8_lossy(alias).into_owned())
                    .unwrap_or_default();
                (Some(certificate), friendly_name)
            }
            _ => (None, String::new()),
        };

        PfxContainer {
            private_key,
            certificate,
            ca_chain,
            friendly_name,
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn has_certificate(&self) -> bool {
        self.certificate.is_some()
    }

    pub fn private_key(&self) -> Option<&PKeyRef<Private>> {
        self.private_key.as_deref()
    }

    pub fn certificate(&self) -> Option<&X509Ref> {
        self.certificate.as_deref()
    }

    pub fn ca_certificates(&self) -> &CaChain {
        &self.ca_chain
    }

    /// The friendly-name label of the leaf certificate's safe bag, or the
    /// empty string when the container carries none.
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }
}
