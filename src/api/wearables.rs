use crate::{types::WearableAnalysisRequest, BondMcpClient, JsonMap, Result};

/// Wearable device data insights.
pub struct WearablesApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> WearablesApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, request: &WearableAnalysisRequest) -> Result<JsonMap> {
        self.client.post("/v1/wearable-data-insights", request).await
    }
}
