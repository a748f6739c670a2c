use crate::error::DecodeError;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

const TAG_SEPARATOR: char = ',';

/// Signature schemes, keyed by the tag in front of the `Webhook-Signature` value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// `v1a`: asymmetric Ed25519.
    #[serde(rename = "v1a")]
    Ed25519,
}

impl SignatureScheme {
    pub const ALL: &'static [SignatureScheme] = &[SignatureScheme::Ed25519];

    pub fn tag(self) -> &'static str {
        match self {
            SignatureScheme::Ed25519 => "v1a",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|scheme| scheme.tag() == tag)
    }

    /// Scheme named by the tag of a `Webhook-Signature` value, if known.
    pub fn from_header(value: &str) -> Option<Self> {
        split_header(value).and_then(|(tag, _)| Self::from_tag(tag))
    }

    /// Byte length of a well-formed raw signature.
    pub fn signature_len(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => ed25519_dalek::SIGNATURE_LENGTH,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Splits `<tag>,<rest>` on the first separator.
pub fn split_header(value: &str) -> Option<(&str, &str)> {
    value.split_once(TAG_SEPARATOR)
}

/// A decoded `<tag>,<base64>` signature value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemedSignature {
    pub scheme: SignatureScheme,
    pub bytes: Vec<u8>,
}

impl SchemedSignature {
    /// Only a single signature is accepted. A header carrying several
    /// space-separated signatures (key rotation) is rejected as malformed.
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        let unsupported = DecodeError::UnsupportedScheme {
            expected: SignatureScheme::Ed25519.tag(),
        };
        let (tag, encoded) = split_header(value).ok_or_else(|| unsupported.clone())?;
        let scheme = SignatureScheme::from_tag(tag).ok_or(unsupported)?;

        let bytes = B64
            .decode(encoded)
            .map_err(|e| DecodeError::MalformedSignature(e.to_string()))?;

        Ok(Self { scheme, bytes })
    }

    pub fn encode(&self) -> String {
        format!("{}{}{}", self.scheme.tag(), TAG_SEPARATOR, B64.encode(&self.bytes))
    }
}

/// Strips the `v1a,` prefix and base64-decodes the rest. No length check is
/// made here; the verifier rejects signatures of the wrong size.
pub fn decode_signature(signature: &str) -> Result<Vec<u8>, DecodeError> {
    let parsed = SchemedSignature::parse(signature)?;
    match parsed.scheme {
        SignatureScheme::Ed25519 => Ok(parsed.bytes),
    }
}
