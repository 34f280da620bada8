use devevent_database::ConnectionManager;

#[async_std::main]
async fn main() {
    let _guard = devevent_config::setup_logging().await;

    let manager = ConnectionManager::from_config()
        .await
        .expect("DevEvent is not configured.");

    let db = manager.get().await.expect("Failed to connect to the database.");
    db.migrate_database().await.expect("Failed to migrate the database.");
}
