use crate::{BondMcpClient, JsonMap, Result};

/// Health insight generation.
pub struct InsightsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> InsightsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Posts `payload` to `/insights`, or `/insights/{insight_type}` when a type is given.
    pub async fn generate(&self, payload: &JsonMap, insight_type: Option<&str>) -> Result<JsonMap> {
        let path = match insight_type {
            Some(kind) => format!("/insights/{kind}"),
            None => "/insights".to_owned(),
        };
        self.client.post(&path, payload).await
    }
}
