use crate::domain::signature::{SchemedSignature, SignatureScheme};
use crate::domain::signed_data::build_signed_data;
use crate::domain::webhook::{WebhookDelivery, WebhookId, WebhookTimestamp};
use crate::error::WebhookError;
use crate::infrastructure::crypto::key_handler::PublicKey;
use crate::infrastructure::crypto::signing;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Checks one delivery: rebuilds the signed bytes, decodes the signature
/// header and verifies it with `key`.
///
/// `Ok(false)` is a well-formed delivery whose signature does not match.
/// Unparseable headers and wrong-sized signatures are errors.
pub fn verify_webhook(
    key: &PublicKey,
    id: &str,
    timestamp: &str,
    payload: &[u8],
    signature: &str,
) -> Result<bool, WebhookError> {
    let schemed = SchemedSignature::parse(signature)?;
    let signed_data = build_signed_data(id, timestamp, payload);
    Ok(signing::verify_schemed(&signed_data, &schemed, key)?)
}

/// Holds an imported key so many deliveries can be checked against it.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    key: PublicKey,
}

impl WebhookVerifier {
    pub fn new(key: PublicKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &PublicKey {
        &self.key
    }

    pub fn verify_delivery(&self, delivery: &WebhookDelivery) -> Result<bool, WebhookError> {
        verify_webhook(
            &self.key,
            delivery.headers.id.as_str(),
            delivery.headers.timestamp.as_str(),
            delivery.payload.as_bytes(),
            &delivery.headers.signature,
        )
    }

    /// Like `verify_delivery`, but folds the outcome into a serializable report.
    pub fn report(&self, delivery: &WebhookDelivery) -> VerificationReport {
        let scheme = SignatureScheme::from_header(&delivery.headers.signature);

        let mut report = VerificationReport {
            webhook_id: delivery.headers.id.clone(),
            timestamp: delivery.headers.timestamp.clone(),
            sent_at: delivery.headers.timestamp.to_datetime(),
            scheme,
            key_fingerprint: self.key.fingerprint(),
            payload_bytes: delivery.payload.len(),
            valid: false,
            error: None,
        };

        match self.verify_delivery(delivery) {
            Ok(valid) => report.valid = valid,
            Err(e) => report.error = Some(e.to_string()),
        }
        report
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct VerificationReport {
    pub webhook_id: WebhookId,
    pub timestamp: WebhookTimestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<SignatureScheme>,
    pub key_fingerprint: String,
    pub payload_bytes: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationReport {
    /// True when the signature could not even be checked.
    pub fn is_malformed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::{WebhookHeaders, WebhookPayload};
    use crate::error::{DecodeError, VerificationError};
    use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
    use ed25519_dalek::{Signer, SigningKey};

    fn signed_delivery(signing: &SigningKey, payload: &[u8]) -> WebhookDelivery {
        let id = "msg_2Lh9KJhq";
        let timestamp = "1700000000";
        let sig = signing.sign(&build_signed_data(id, timestamp, payload));
        WebhookDelivery {
            headers: WebhookHeaders {
                id: WebhookId::new(id),
                timestamp: WebhookTimestamp::new(timestamp),
                signature: format!("v1a,{}", B64.encode(sig.to_bytes())),
            },
            payload: WebhookPayload::new(payload),
        }
    }

    fn verifier(seed: u8) -> (SigningKey, WebhookVerifier) {
        let signing = SigningKey::from_bytes(&[seed; 32]);
        let verifier = WebhookVerifier::new(PublicKey::from(signing.verifying_key()));
        (signing, verifier)
    }

    #[test]
    fn verifies_signed_delivery() {
        let (signing, verifier) = verifier(11);
        let delivery = signed_delivery(&signing, br#"{"type":"user.created"}"#);
        assert_eq!(verifier.verify_delivery(&delivery), Ok(true));
    }

    #[test]
    fn empty_payload_verifies() {
        let (signing, verifier) = verifier(12);
        let delivery = signed_delivery(&signing, b"");
        assert_eq!(verifier.verify_delivery(&delivery), Ok(true));
    }

    #[test]
    fn tampered_fields_are_invalid_not_errors() {
        let (signing, verifier) = verifier(13);
        let original = signed_delivery(&signing, br#"{"amount":100}"#);

        let mut payload = original.clone();
        payload.payload = WebhookPayload::new(br#"{"amount":900}"#.to_vec());
        let mut id = original.clone();
        id.headers.id = WebhookId::new("msg_other");
        let mut timestamp = original.clone();
        timestamp.headers.timestamp = WebhookTimestamp::new("1700000001");

        for delivery in [payload, id, timestamp] {
            assert_eq!(verifier.verify_delivery(&delivery), Ok(false));
        }
    }

    #[test]
    fn malformed_headers_are_errors() {
        let (signing, verifier) = verifier(14);
        let mut delivery = signed_delivery(&signing, b"{}");

        delivery.headers.signature = "v1,abcd".into();
        assert!(matches!(
            verifier.verify_delivery(&delivery),
            Err(WebhookError::Decode(DecodeError::UnsupportedScheme { .. }))
        ));

        delivery.headers.signature = "v1a,@@@".into();
        assert!(matches!(
            verifier.verify_delivery(&delivery),
            Err(WebhookError::Decode(DecodeError::MalformedSignature(_)))
        ));

        delivery.headers.signature = format!("v1a,{}", B64.encode([0u8; 10]));
        assert!(matches!(
            verifier.verify_delivery(&delivery),
            Err(WebhookError::Verification(
                VerificationError::InvalidSignatureLength { actual: 10, .. }
            ))
        ));
    }

    #[test]
    fn report_carries_outcome_and_context() {
        let (signing, verifier) = verifier(15);
        let delivery = signed_delivery(&signing, b"{}");

        let report = verifier.report(&delivery);
        assert!(report.valid);
        assert!(!report.is_malformed());
        assert_eq!(report.scheme, Some(SignatureScheme::Ed25519));
        assert_eq!(report.payload_bytes, 2);
        assert_eq!(report.key_fingerprint, verifier.key().fingerprint());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["webhook_id"], "msg_2Lh9KJhq");
        assert_eq!(json["scheme"], "v1a");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn report_records_error() {
        let (signing, verifier) = verifier(16);
        let mut delivery = signed_delivery(&signing, b"{}");
        delivery.headers.signature = "v2,AAAA".into();

        let report = verifier.report(&delivery);
        assert!(!report.valid);
        assert!(report.is_malformed());
        assert_eq!(report.scheme, None);
    }
}
