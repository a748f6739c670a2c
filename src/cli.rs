use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging output.")]
    pub debug: bool,

    #[arg(long, short = 'n', global = true, help = "Disable emoji output.")]
    pub no_emojis: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Verifies a Standard Webhooks v1a (Ed25519) signature.",
        long_about = "Exit status is 0 for a valid signature, 1 for an invalid one and 2 when the input could not be verified at all (malformed signature, bad key, missing headers)."
    )]
    Verify(VerifyArgs),
    #[command(
        about = "Configure default settings for hooksig.",
        long_about = "Run with arguments to set values directly, or run without arguments for an interactive setup session."
    )]
    Configure(ConfigureArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("header-source").required(true).args(&["id", "headers"])))]
pub struct VerifyArgs {
    #[arg(long, value_name = "PATH", help = "Path to the sender's public key (PEM). Overrides configured default.")]
    pub key: Option<PathBuf>,

    #[arg(long, value_name = "ID", requires = "timestamp", help = "Value of the Webhook-Id header.")]
    pub id: Option<String>,

    #[arg(long, value_name = "UNIX_SECONDS", requires = "signature", help = "Value of the Webhook-Timestamp header.")]
    pub timestamp: Option<String>,

    #[arg(long, value_name = "SIGNATURE", requires = "id", help = "Value of the Webhook-Signature header (\"v1a,<base64>\").")]
    pub signature: Option<String>,

    #[arg(long, value_name = "FILE", help = "JSON object of request headers containing the webhook-* headers.")]
    pub headers: Option<PathBuf>,

    #[arg(long, value_name = "FILE", default_value = "-", help = "Raw request body. Use '-' for stdin.")]
    pub payload: PathBuf,

    #[arg(long, short, help = "Output result as structured JSON.")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigureArgs {
    #[arg(long, value_name = "PATH", help = "Set the default public key (PEM) used for verification.")]
    pub public_key_path: Option<PathBuf>,

    #[arg(long, short, help = "Output result as structured JSON.")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_verify_with_individual_headers() {
        let cli = Cli::try_parse_from([
            "hooksig", "verify", "--key", "k.pem", "--id", "msg_1", "--timestamp", "1",
            "--signature", "v1a,AAAA", "--payload", "body.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify(args) => {
                assert_eq!(args.id.as_deref(), Some("msg_1"));
                assert_eq!(args.payload, PathBuf::from("body.json"));
                assert!(args.headers.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn payload_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["hooksig", "verify", "--headers", "h.json"]).unwrap();
        match cli.command {
            Commands::Verify(args) => assert_eq!(args.payload, PathBuf::from("-")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verify_requires_a_header_source() {
        assert!(Cli::try_parse_from(["hooksig", "verify", "--payload", "b"]).is_err());
    }

    #[test]
    fn id_requires_timestamp_and_signature() {
        assert!(Cli::try_parse_from(["hooksig", "verify", "--id", "msg_1"]).is_err());
    }

    #[test]
    fn id_and_headers_conflict() {
        assert!(Cli::try_parse_from([
            "hooksig", "verify", "--headers", "h.json", "--id", "x", "--timestamp", "1",
            "--signature", "v1a,AAAA",
        ])
        .is_err());
    }
}
