//! Multi-step orchestration and direct tool invocation.

use crate::{
    types::{OrchestrateRequest, ToolCallRequest},
    BondMcpClient, JsonMap, Result,
};

pub struct OrchestrateApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> OrchestrateApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Runs a sequence of tool invocations server-side.
    pub async fn run(&self, request: &OrchestrateRequest) -> Result<JsonMap> {
        self.client.post("/orchestrate", request).await
    }
}

pub struct ToolsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> ToolsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Calls a single tool by name.
    pub async fn call(&self, request: &ToolCallRequest) -> Result<JsonMap> {
        self.client.post("/tools/call", request).await
    }
}
