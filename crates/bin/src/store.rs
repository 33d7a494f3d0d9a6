//! User store creation for the serve command.

use std::path::Path;

use roster::{InMemoryUserStore, UserStore};

/// Load the store from `data_file`, or start empty when no file is configured.
///
/// A missing file is a fresh store; a file that cannot be parsed is an error
/// so that shutdown does not overwrite it.
pub async fn load_store(
    data_file: Option<&Path>,
) -> Result<InMemoryUserStore, Box<dyn std::error::Error>> {
    let Some(path) = data_file else {
        tracing::info!("Using in-memory user store without persistence");
        return Ok(InMemoryUserStore::new());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let store = InMemoryUserStore::load_from_file(path)
        .await
        .map_err(|e| format!("Failed to load users from {}: {e}", path.display()))?;
    tracing::info!(
        "Loaded {} users from {}",
        store.count().await?,
        path.display()
    );
    Ok(store)
}

/// Save the store to `data_file`, reporting the outcome on the terminal.
pub async fn save_store(store: &InMemoryUserStore, data_file: &Path) {
    match store.save_to_file(data_file).await {
        Ok(()) => {
            tracing::info!("Users saved to {}", data_file.display());
            println!("\nUsers saved successfully");
        }
        Err(e) => {
            tracing::error!("Failed to save users: {e:?}");
            eprintln!("Failed to save users: {e:?}");
        }
    }
}
