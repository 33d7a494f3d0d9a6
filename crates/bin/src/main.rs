use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;
mod store;

use cli::{Cli, Commands};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Client commands only surface warnings unless RUST_LOG asks for more
    let directive = match cli.command {
        Commands::Serve(_) => "roster=info",
        _ => "roster=warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Health(args) => commands::health::run(args, format).await,
        Commands::Login(args) => commands::auth::login(args, format).await,
        Commands::Register(args) => commands::auth::register(args, format).await,
        Commands::Logout(args) => commands::auth::logout(args, format).await,
        Commands::Users(args) => commands::users::run(args, format).await,
    }
}
