use crate::{BondMcpClient, JsonMap, Result};

/// Third-party data imports.
pub struct ImportsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> ImportsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Imports an Oura ring export.
    pub async fn oura(&self, data: &JsonMap) -> Result<JsonMap> {
        self.client.post("/import/oura", data).await
    }
}

/// Conversation-scoped uploads.
pub struct ChatApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    pub async fn upload_health_data(
        &self,
        conversation_id: &str,
        data: &JsonMap,
    ) -> Result<JsonMap> {
        let path = format!("/v1/chat/conversation/{conversation_id}/health-data");
        self.client.post(&path, data).await
    }
}
