use clap::Parser;
use scripts::{cli::Cli, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // A missing `.env` file is fine, the environment may be set directly
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().pretty().init();

    let (command, config) = Cli::parse().into_parts();
    command.run(&config).await
}
