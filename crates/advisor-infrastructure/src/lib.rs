pub mod catalog_source;
pub mod config;
pub mod paths;
pub mod selection_repository;
pub mod storage;

pub use crate::catalog_source::{FileCatalogSource, HttpCatalogSource, source_for};
pub use crate::config::{AdvisorConfig, CatalogLocation};
pub use crate::selection_repository::StorageSelectionRepository;
