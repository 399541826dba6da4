//! Catalog sources: a local JSON document or an HTTP(S) URL.

use advisor_core::catalog::{Catalog, CatalogSource};
use advisor_core::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::CatalogLocation;

/// Builds the source matching a configured location.
pub fn source_for(location: &CatalogLocation) -> Arc<dyn CatalogSource> {
    match location {
        CatalogLocation::File(path) => Arc::new(FileCatalogSource::new(path.clone())),
        CatalogLocation::Url(url) => Arc::new(HttpCatalogSource::new(url.clone())),
    }
}

/// Reads the catalog from a JSON file.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Catalog> {
        let origin = self.describe();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| AdvisorError::fetch(&origin, err.to_string()))?;
        Catalog::from_json(&origin, &bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the catalog with a GET request.
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Catalog> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| AdvisorError::fetch(&self.url, format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::fetch(
                &self.url,
                format!("unexpected status {}", status.as_u16()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| AdvisorError::fetch(&self.url, format!("failed to read body: {err}")))?;
        Catalog::from_json(&self.url, &bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{"products": [
        {"id": 1, "brand": "CeraVe", "name": "Cleanser", "category": "cleanser",
         "description": "d", "image": "i.png"}
    ]}"#;

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.json");
        std::fs::write(&path, DOCUMENT).unwrap();

        let catalog = FileCatalogSource::new(path).fetch().await.unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileCatalogSource::new(temp_dir.path().join("nope.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_http_source_fetches_document() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/products.json");
            then.status(200).body(DOCUMENT);
        });

        let catalog = HttpCatalogSource::new(server.url("/products.json"))
            .fetch()
            .await
            .unwrap();

        mock.assert();
        assert_eq!(catalog.by_category("cleanser").len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_status_is_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products.json");
            then.status(404).body("missing");
        });

        let err = HttpCatalogSource::new(server.url("/products.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_source_for_location() {
        let file = source_for(&CatalogLocation::parse("data/products.json"));
        assert_eq!(file.describe(), "data/products.json");

        let url = source_for(&CatalogLocation::parse("https://cdn.example.dev/p.json"));
        assert_eq!(url.describe(), "https://cdn.example.dev/p.json");
    }
}
