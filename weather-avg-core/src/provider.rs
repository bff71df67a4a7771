//! Transport seam between the averager and the archive API.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::TransportError;

pub mod http;
pub mod open_meteo;

pub use http::HttpTransport;

/// A fully-built GET request: endpoint plus query parameters in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl ArchiveRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }
}

/// Status and body of whatever the server answered, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Issue one GET. Only failures to obtain a response are errors here;
    /// non-success statuses come back as a `RawResponse`.
    async fn get(&self, request: &ArchiveRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let ok = RawResponse { status: 204, body: String::new() };
        let redirect = RawResponse { status: 301, body: String::new() };
        let bad = RawResponse { status: 400, body: String::new() };

        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn param_lookup() {
        let req = ArchiveRequest {
            url: "http://localhost".into(),
            params: vec![("latitude", "1.5".into()), ("timezone", "auto".into())],
        };

        assert_eq!(req.param("timezone"), Some("auto"));
        assert_eq!(req.param("hourly"), None);
    }
}
