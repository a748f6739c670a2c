use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a `Webhook-Signature` header value into signature bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unsupported signature scheme: expected a '{expected},' prefix")]
    UnsupportedScheme { expected: &'static str },

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyImportError {
    #[error("Invalid PEM format: {0}")]
    InvalidPemFormat(String),

    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),
}

/// The inputs were structurally unusable, so no verification was attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid signature length for {scheme}: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        scheme: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    KeyImport(#[from] KeyImportError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing webhook header '{0}'")]
    MissingHeader(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::Webhook(e.into())
    }
}

impl From<KeyImportError> for AppError {
    fn from(e: KeyImportError) -> Self {
        AppError::Webhook(e.into())
    }
}

impl From<VerificationError> for AppError {
    fn from(e: VerificationError) -> Self {
        AppError::Webhook(e.into())
    }
}
