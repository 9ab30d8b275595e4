// Docseal — Application Entry Point
//
// Loads an optional .env file, initializes structured logging on stderr
// (stdout is reserved for the JSON envelope), parses CLI arguments, and
// dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use docseal::cli::{execute, Cli, Envelope};

fn main() {
    dotenvy::dotenv().ok();

    // RUST_LOG=docseal=debug for verbose output. Secrets and signatures are
    // never logged at any level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docseal=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let envelope = match execute(cli.command) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Envelope::error(&e)
        }
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }

    if !envelope.is_success() {
        std::process::exit(1);
    }
}
