use crate::{types::LabInterpretRequest, BondMcpClient, JsonMap, Result};

/// Lab result interpretation.
pub struct LabsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> LabsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    pub async fn interpret(&self, request: &LabInterpretRequest) -> Result<JsonMap> {
        self.client.post("/labs/interpret", request).await
    }
}
