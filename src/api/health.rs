//! Health API.

use crate::{BondMcpClient, JsonMap, Result};

/// Service status endpoint.
pub struct HealthApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Returns the operational status reported by `GET /health`.
    pub async fn check(&self) -> Result<JsonMap> {
        self.client.get("/health").await
    }

    /// Simple connectivity check - returns true if the API answered with 2xx.
    pub async fn is_healthy(&self) -> bool {
        self.check().await.is_ok()
    }
}
