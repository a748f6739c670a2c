use clap::Parser;
use hooksig::cli::{Cli, Commands};
use hooksig::commands::{configure, verify};
use hooksig::ui::logger::Logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut logger = Logger::new(cli.debug, !cli.no_emojis);

    let result = match cli.command {
        Commands::Verify(args) => {
            logger.set_json_mode(args.json);
            verify::execute(args, &logger)
        }
        Commands::Configure(args) => {
            logger.set_json_mode(args.json);
            configure::execute(args, &logger)
        }
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            logger.error(&format!("{}", e), None);
            ExitCode::from(verify::EXIT_MALFORMED)
        }
    }
}
