//! CLI argument definitions for the Roster binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Roster user management service and admin panel
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Roster: user management service and terminal admin panel")]
#[command(version)]
pub struct Cli {
    /// Print JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Roster server
    Serve(ServeArgs),
    /// Check health of a running Roster server
    Health(HealthArgs),
    /// Log in and save the session token
    Login(CredentialsArgs),
    /// Create an account (does not log in)
    Register(CredentialsArgs),
    /// Revoke and forget the saved session token
    Logout(ClientArgs),
    /// Manage users
    Users(UsersArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "ROSTER_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "ROSTER_HOST")]
    pub host: String,

    /// JSON file the users are loaded from and saved to on shutdown.
    /// Without it, users live only as long as the process.
    #[arg(short = 'D', long, env = "ROSTER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Require a bearer token from /login on the /users routes
    #[arg(long, env = "ROSTER_REQUIRE_AUTH")]
    pub require_auth: bool,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://localhost:8000", env = "ROSTER_URL")]
    pub url: Url,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Connection settings shared by the client commands
#[derive(clap::Args, Debug)]
pub struct ClientArgs {
    /// Base URL of the Roster server
    #[arg(long, default_value = "http://localhost:8000", env = "ROSTER_URL")]
    pub url: Url,

    /// File the session token is kept in between invocations
    #[arg(long, default_value = ".roster-session.json", env = "ROSTER_SESSION_FILE")]
    pub session_file: PathBuf,
}

/// Arguments for login and register
#[derive(clap::Args, Debug)]
pub struct CredentialsArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, env = "ROSTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the users command
#[derive(clap::Args, Debug)]
pub struct UsersArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List all users
    List,
    /// Show a single user
    Show { id: u64 },
    /// Add a user
    Add {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Change a user's email and/or password
    Edit {
        id: u64,
        /// New email (defaults to the current one)
        #[arg(short, long)]
        email: Option<String>,
        /// New password (the old one is kept if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete a user
    Delete { id: u64 },
}
