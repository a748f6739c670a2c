use crate::app_config::{ConfigManager, PUBLIC_KEY_ENV};
use crate::cli::VerifyArgs;
use crate::domain::webhook::{WebhookDelivery, WebhookHeaders, WebhookId, WebhookPayload, WebhookTimestamp};
use crate::error::AppError;
use crate::infrastructure::crypto::key_handler;
use crate::services::{VerificationReport, WebhookVerifier};
use crate::ui::logger::{print_json, Logger};
use crate::utils::files;
use std::path::PathBuf;
use std::process::ExitCode;

pub const EXIT_VALID: u8 = 0;
pub const EXIT_INVALID: u8 = 1;
/// Exit status for input that could not be verified at all.
pub const EXIT_MALFORMED: u8 = 2;

pub fn execute(args: VerifyArgs, logger: &Logger) -> Result<ExitCode, AppError> {
    let key_path = resolve_key_path(&args, ConfigManager::new)?;
    logger.debug(&format!("Loading public key from {}", key_path.display()), Some("🔑"));
    let key = key_handler::load_public_key_file(&key_path)?;
    logger.debug(&format!("Key fingerprint: {}", key.fingerprint()), None);

    let headers = resolve_headers(&args)?;
    let payload = WebhookPayload::new(files::read_bytes(&args.payload)?);
    logger.debug(
        &format!("Read {} payload bytes from {}", payload.len(), args.payload.display()),
        Some("📦"),
    );

    let delivery = WebhookDelivery { headers, payload };
    let report = WebhookVerifier::new(key).report(&delivery);
    print_report(&report, args.json, logger);

    Ok(ExitCode::from(exit_status(&report)))
}

/// `--key`, then the environment, then the config file. The config is only
/// opened when no `--key` is given.
fn resolve_key_path<F>(args: &VerifyArgs, open_config: F) -> Result<PathBuf, AppError>
where
    F: FnOnce() -> Result<ConfigManager, AppError>,
{
    if let Some(key_path) = &args.key {
        return Ok(key_path.clone());
    }
    open_config()?.get_public_key_path().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "No public key given. Use --key, set {}, or run 'hooksig configure'.",
            PUBLIC_KEY_ENV
        ))
    })
}

fn resolve_headers(args: &VerifyArgs) -> Result<WebhookHeaders, AppError> {
    if let Some(headers_path) = &args.headers {
        return WebhookHeaders::from_json(&files::read_text(headers_path)?);
    }
    match (&args.id, &args.timestamp, &args.signature) {
        (Some(id), Some(timestamp), Some(signature)) => Ok(WebhookHeaders {
            id: WebhookId::new(id.clone()),
            timestamp: WebhookTimestamp::new(timestamp.clone()),
            signature: signature.clone(),
        }),
        _ => Err(AppError::InvalidInput(
            "Provide --id, --timestamp and --signature, or --headers.".into(),
        )),
    }
}

fn exit_status(report: &VerificationReport) -> u8 {
    if report.valid {
        EXIT_VALID
    } else if report.is_malformed() {
        EXIT_MALFORMED
    } else {
        EXIT_INVALID
    }
}

fn print_report(report: &VerificationReport, json_output: bool, logger: &Logger) {
    if json_output {
        print_json(report);
        return;
    }

    if report.valid {
        logger.success(&format!("VALID: webhook {}", report.webhook_id), Some("✅"));
    } else if let Some(err) = &report.error {
        logger.error(&format!("MALFORMED: webhook {}", report.webhook_id), Some("🚫"));
        logger.error(&format!("  └─ Error: {}", err), None);
        return;
    } else {
        logger.error(&format!("INVALID: webhook {}", report.webhook_id), Some("❌"));
    }

    if let Some(scheme) = report.scheme {
        logger.info(&format!("  ├─ Scheme:      {}", scheme), None);
    }
    match report.sent_at {
        Some(sent_at) => logger.info(
            &format!("  ├─ Timestamp:   {} ({})", report.timestamp, sent_at.to_rfc3339()),
            None,
        ),
        None => logger.info(&format!("  ├─ Timestamp:   {}", report.timestamp), None),
    }
    logger.info(&format!("  ├─ Payload:     {} bytes", report.payload_bytes), None);
    logger.info(&format!("  └─ Key:         {}", report.key_fingerprint), None);
}
