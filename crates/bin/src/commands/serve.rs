//! Serve command - runs the Roster HTTP service.

use std::sync::Arc;

use roster::api::{self, AppState, ServerConfig};
use tokio::signal::unix::{SignalKind, signal};

use crate::{
    cli::ServeArgs,
    store::{load_store, save_store},
};

/// Run the Roster server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(load_store(args.data_file.as_deref()).await?);
    let config = ServerConfig {
        require_auth: args.require_auth,
    };
    let app = api::router(AppState::new(store.clone(), config));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!(
        "Roster server starting on http://localhost:{}",
        local_addr.port()
    );
    println!();
    println!("Available endpoints:");
    println!("  POST   /login       - Exchange email and password for a token");
    println!("  POST   /logout      - Revoke the bearer token");
    println!("  POST   /register    - Create a user");
    println!("  GET    /users       - List users");
    println!("  GET    /users/{{id}}  - Show a user");
    println!("  PUT    /users/{{id}}  - Update a user's email and/or password");
    println!("  DELETE /users/{{id}}  - Delete a user");
    println!("  GET    /health      - Health check");
    println!();
    if config.require_auth {
        println!("Bearer token required on /users routes");
    }
    match &args.data_file {
        Some(path) => println!("Users persist to {}", path.display()),
        None => println!("Users are not persisted (no --data-file)"),
    }
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Save once in-flight requests have drained
    if let Some(path) = &args.data_file {
        save_store(&store, path).await;
    }

    println!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to set up SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            Err(e) => tracing::warn!("Failed to listen for SIGINT, shutting down: {e}"),
        },
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
