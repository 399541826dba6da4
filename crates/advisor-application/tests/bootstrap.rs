use advisor_application::bootstrap::session_from_config;
use advisor_core::catalog::ProductId;
use advisor_infrastructure::{AdvisorConfig, CatalogLocation};
use tempfile::TempDir;

const CATALOG: &str = r#"{"products": [
    {"id": "a1", "brand": "Nivea", "name": "Soft Cream", "category": "moisturizer",
     "description": "Light cream.", "image": "img/a1.jpg"}
]}"#;

fn config(dir: &TempDir) -> AdvisorConfig {
    let catalog = dir.path().join("products.json");
    std::fs::write(&catalog, CATALOG).unwrap();
    AdvisorConfig {
        endpoint: None,
        catalog: CatalogLocation::File(catalog),
        storage_dir: Some(dir.path().join("state")),
        log_dir: Some(dir.path().join("logs")),
        system_prompt: Some("Be brief.".to_string()),
    }
}

#[tokio::test]
async fn test_session_from_config_persists_to_storage_dir() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);

    let session = session_from_config(&config).unwrap();
    assert_eq!(session.conversation().await[0].content, "Be brief.");
    session.select(&ProductId::from("a1")).await.unwrap();

    let stored = std::fs::read_to_string(dir.path().join("state").join("storage.json")).unwrap();
    assert!(stored.contains("selected_products@v1"));

    let reopened = session_from_config(&config).unwrap();
    reopened.start().await.unwrap();
    assert!(reopened.is_selected(&ProductId::from("a1")).await);
}

#[tokio::test]
async fn test_missing_catalog_keeps_session_usable() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.catalog = CatalogLocation::File(dir.path().join("absent.json"));

    let session = session_from_config(&config).unwrap();

    assert!(session.start().await.unwrap_err().is_fetch());
    assert!(session.selection().await.is_empty());
    assert_eq!(session.ask("  ").await.unwrap(), None);
}
