//! User store tests through the public `UserStore` trait.

use std::sync::Arc;

use roster::{InMemoryUserStore, Result, UserStore, user::UserUpdate};

#[tokio::test]
async fn test_store_behind_trait_object() -> Result<()> {
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    let alice = store.create("a@x.com", "p1").await?;
    let bob = store.create("b@x.com", "p2").await?;
    assert_eq!((alice.id, bob.id), (1, 2));

    let listed = store.list().await?;
    assert_eq!(listed, vec![alice.clone(), bob.clone()]);
    assert_eq!(store.count().await?, 2);

    store.delete(alice.id).await?;
    let err = store.get_by_id(alice.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.list().await?, vec![bob]);

    Ok(())
}

#[tokio::test]
async fn test_update_then_authenticate() -> Result<()> {
    let store = InMemoryUserStore::new();
    let user = store.create("a@x.com", "p1").await?;

    store.update(user.id, UserUpdate::email("b@x.com")).await?;
    assert!(store.authenticate("a@x.com", "p1").await.is_err());
    assert_eq!(store.authenticate("b@x.com", "p1").await?.id, user.id);

    store.update(user.id, UserUpdate::password("p9")).await?;
    let err = store.authenticate("b@x.com", "p1").await.unwrap_err();
    assert!(err.is_authentication_error());
    assert_eq!(store.authenticate("b@x.com", "p9").await?.email, "b@x.com");

    Ok(())
}

#[tokio::test]
async fn test_persisted_store_keeps_counter_across_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("users.json");

    let store = InMemoryUserStore::new();
    store.create("a@x.com", "p1").await?;
    let second = store.create("b@x.com", "p2").await?;
    store.delete(second.id).await?;
    store.save_to_file(&path).await?;

    let reloaded = InMemoryUserStore::load_from_file(&path).await?;
    assert_eq!(reloaded.count().await?, 1);
    assert_eq!(reloaded.authenticate("a@x.com", "p1").await?.id, 1);

    // The deleted id is not handed out again
    let third = reloaded.create("c@x.com", "p3").await?;
    assert_eq!(third.id, 3);

    Ok(())
}

#[tokio::test]
async fn test_store_file_does_not_contain_plaintext_passwords() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("users.json");

    let store = InMemoryUserStore::new();
    store.create("a@x.com", "hunter2-plaintext").await?;
    store.save_to_file(&path).await?;

    let contents = std::fs::read_to_string(&path)?;
    assert!(contents.contains("a@x.com"));
    assert!(!contents.contains("hunter2-plaintext"));

    Ok(())
}

#[tokio::test]
async fn test_corrupt_store_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = InMemoryUserStore::load_from_file(&path).await.unwrap_err();
    assert_eq!(err.module(), "serialize");
}
