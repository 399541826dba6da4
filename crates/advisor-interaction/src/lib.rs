//! Clients for the external advisory endpoint.

mod http_advisory_client;

pub use http_advisory_client::HttpAdvisoryClient;
