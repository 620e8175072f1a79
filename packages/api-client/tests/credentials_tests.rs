use alma_api_client::FileCredentialStore;
use alma_core::common::auth::Role;
use alma_core::domains::auth::models::{Session, ROLE_KEY, TOKEN_KEY};
use alma_core::kernel::BaseCredentialStore;

#[tokio::test]
async fn values_persist_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    let store = FileCredentialStore::new(&path);
    store.set(TOKEN_KEY, "jwt-abc").await.unwrap();
    store.set(ROLE_KEY, "SUPER_ADMIN").await.unwrap();
    assert!(path.exists());

    let reopened = FileCredentialStore::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).await.unwrap().as_deref(), Some("jwt-abc"));
    assert_eq!(reopened.get(ROLE_KEY).await.unwrap().as_deref(), Some("SUPER_ADMIN"));
    assert_eq!(reopened.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn removing_last_key_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::new(&path);

    store.set(TOKEN_KEY, "jwt-abc").await.unwrap();
    store.remove(TOKEN_KEY).await.unwrap();
    assert!(!path.exists());

    // removing again is fine
    store.remove(TOKEN_KEY).await.unwrap();
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(store.get(TOKEN_KEY).await.is_err());
}

#[tokio::test]
async fn session_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.json"));

    let session = Session {
        token: "jwt-abc".into(),
        email: "admin@centroalma.es".into(),
        role: Role::AdminOrganizacion,
        password_temporal: true,
    };
    session.save(&store).await.unwrap();

    let loaded = Session::load(&store).await.unwrap().unwrap();
    assert_eq!(loaded, session);

    Session::clear(&store).await.unwrap();
    assert!(Session::load(&store).await.unwrap().is_none());
}
