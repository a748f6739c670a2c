use crate::domain::signature::{SchemedSignature, SignatureScheme};
use crate::error::VerificationError;
use crate::infrastructure::crypto::key_handler::PublicKey;
use ed25519_dalek::Signature;

/// Ed25519 verification of `signed_data` against a raw signature.
///
/// `Ok(false)` means the signature was checked and does not match. `Err` means
/// it could not be checked at all.
pub fn verify(
    signed_data: &[u8],
    signature: &[u8],
    key: &PublicKey,
) -> Result<bool, VerificationError> {
    let sig = Signature::from_slice(signature).map_err(|_| {
        VerificationError::InvalidSignatureLength {
            scheme: SignatureScheme::Ed25519.tag(),
            expected: SignatureScheme::Ed25519.signature_len(),
            actual: signature.len(),
        }
    })?;

    Ok(key.verify_ed25519(signed_data, &sig))
}

pub fn verify_schemed(
    signed_data: &[u8],
    signature: &SchemedSignature,
    key: &PublicKey,
) -> Result<bool, VerificationError> {
    match signature.scheme {
        SignatureScheme::Ed25519 => verify(signed_data, &signature.bytes, key),
    }
}
