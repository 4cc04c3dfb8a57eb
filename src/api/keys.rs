//! API key management.

use crate::{
    types::{CreateApiKeyRequest, UpdateApiKeyRequest},
    BondMcpClient, JsonMap, Result,
};

pub struct ApiKeysApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> ApiKeysApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Lists keys of the authenticated user.
    pub async fn list(&self) -> Result<JsonMap> {
        self.client.get("/api-keys").await
    }

    pub async fn create(&self, request: &CreateApiKeyRequest) -> Result<JsonMap> {
        self.client.post("/api-keys", request).await
    }

    pub async fn update(&self, key_id: &str, request: &UpdateApiKeyRequest) -> Result<JsonMap> {
        self.client
            .put(&format!("/api-keys/{key_id}"), request)
            .await
    }

    /// Revokes (deletes) a key.
    pub async fn revoke(&self, key_id: &str) -> Result<JsonMap> {
        self.client.delete(&format!("/api-keys/{key_id}")).await
    }
}
