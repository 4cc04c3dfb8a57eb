//! Health question answering.

use crate::{types::AskRequest, BondMcpClient, JsonMap, Result};

pub struct AskApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> AskApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Sends a question to `POST /ask`.
    pub async fn query(&self, request: &AskRequest) -> Result<JsonMap> {
        self.client.post("/ask", request).await
    }
}
