pub mod verification_service;

pub use verification_service::{verify_webhook, VerificationReport, WebhookVerifier};
