use crate::app_config::ConfigManager;
use crate::cli::ConfigureArgs;
use crate::error::AppError;
use crate::infrastructure::crypto::key_handler;
use crate::ui::logger::{print_json, Logger};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub fn execute(args: ConfigureArgs, logger: &Logger) -> Result<ExitCode, AppError> {
    let mut config_manager = ConfigManager::new()?;

    let key_path = match &args.public_key_path {
        Some(path) => {
            logger.info("Updating configuration non-interactively...", Some("🤖"));
            path.clone()
        }
        None => {
            logger.info("Configuring hooksig defaults (interactive)", Some("⚙️"));
            logger.info(
                &format!(
                    "Configuration will be saved to: {}",
                    config_manager.get_config_path().display()
                ),
                None,
            );
            let current = config_manager
                .get_public_key_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            PathBuf::from(prompt_with_default(
                "Enter path to the sender's public key (PEM)",
                &current,
            )?)
        }
    };

    if key_path.as_os_str().is_empty() {
        return Err(AppError::InvalidInput("Public key path must not be empty.".into()));
    }

    // Refuse to store a path that would fail on the next verify.
    let key = key_handler::load_public_key_file(&key_path)?;
    config_manager.set_public_key_path(key_path.clone());
    config_manager.save()?;

    if args.json {
        print_json(&json!({
            "status": "success",
            "message": "Configuration saved.",
            "config_file": config_manager.get_config_path(),
            "public_key_path": key_path,
            "key_fingerprint": key.fingerprint(),
        }));
    } else {
        logger.success(
            &format!("Default public key set to: {}", key_path.display()),
            Some("🔑"),
        );
        logger.info(&format!("  └─ Fingerprint: {}", key.fingerprint()), None);
        logger.success("Configuration saved successfully!", Some("✅"));
    }

    Ok(ExitCode::SUCCESS)
}

fn prompt_with_default(prompt_text: &str, default: &str) -> Result<String, AppError> {
    print!("{} [{}]: ", prompt_text, default);
    io::stdout().flush().map_err(|e| AppError::Io {
        path: PathBuf::from("<stdout>"),
        source: e,
    })?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(|e| AppError::Io {
        path: PathBuf::from("<stdin>"),
        source: e,
    })?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
