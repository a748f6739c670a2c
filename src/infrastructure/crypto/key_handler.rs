use crate::error::{AppError, KeyImportError};
use crate::infrastructure::hashing;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::fmt;
use std::fs;
use std::path::Path;

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

/// Verify-only handle to an Ed25519 public key.
///
/// The wrapped key cannot sign and its raw bytes are not handed out; only a
/// fingerprint is exposed, for display.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    pub(crate) fn verify_ed25519(&self, message: &[u8], signature: &Signature) -> bool {
        self.inner.verify(message, signature).is_ok()
    }

    /// Hex SHA-256 of the raw 32-byte key.
    pub fn fingerprint(&self) -> String {
        hashing::sha256_hex(self.inner.as_bytes())
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(inner: VerifyingKey) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Imports a PEM-wrapped SPKI Ed25519 public key.
pub fn import_public_key(pem: &str) -> Result<PublicKey, KeyImportError> {
    let der = pem_to_der(pem)?;
    let key = VerifyingKey::from_public_key_der(&der)
        .map_err(|e| KeyImportError::InvalidKeyEncoding(e.to_string()))?;
    Ok(PublicKey::from(key))
}

pub fn load_public_key_file(path: &Path) -> Result<PublicKey, AppError> {
    let pem = fs::read_to_string(path).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(import_public_key(&pem)?)
}

fn pem_to_der(pem: &str) -> Result<Vec<u8>, KeyImportError> {
    let body = pem
        .trim()
        .strip_prefix(PEM_HEADER)
        .ok_or_else(|| KeyImportError::InvalidPemFormat(format!("missing '{}' header", PEM_HEADER)))?
        .strip_suffix(PEM_FOOTER)
        .ok_or_else(|| KeyImportError::InvalidPemFormat(format!("missing '{}' footer", PEM_FOOTER)))?;

    let encoded: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if encoded.is_empty() {
        return Err(KeyImportError::InvalidPemFormat("empty PEM body".into()));
    }

    B64.decode(encoded)
        .map_err(|e| KeyImportError::InvalidPemFormat(format!("PEM body is not base64: {}", e)))
}
