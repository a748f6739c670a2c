//! Verification of Standard Webhooks asymmetric (`v1a`, Ed25519) signatures.
//!
//! ```no_run
//! use hooksig::{import_public_key, verify_webhook};
//!
//! # fn run(pem: &str, body: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let key = import_public_key(pem)?;
//! let valid = verify_webhook(&key, "msg_2Lh9KJhq", "1700000000", body, "v1a,...")?;
//! # let _ = valid;
//! # Ok(())
//! # }
//! ```

pub mod app_config;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;
pub mod ui;
pub mod utils;

pub mod commands {
    pub mod configure;
    pub mod verify;
}

pub use domain::signature::{decode_signature, SchemedSignature, SignatureScheme};
pub use domain::signed_data::build_signed_data;
pub use domain::webhook::{WebhookDelivery, WebhookHeaders, WebhookId, WebhookPayload, WebhookTimestamp};
pub use error::{DecodeError, KeyImportError, VerificationError, WebhookError};
pub use infrastructure::crypto::key_handler::{import_public_key, PublicKey};
pub use infrastructure::crypto::signing::verify;
pub use services::{verify_webhook, VerificationReport, WebhookVerifier};
