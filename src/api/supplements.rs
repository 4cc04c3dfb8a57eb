//! Supplement recommendations and interaction checks.

use crate::{
    types::{InteractionCheckRequest, SupplementRecommendRequest},
    BondMcpClient, JsonMap, Result,
};

pub struct SupplementsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> SupplementsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    /// Personalized recommendations from health goals and, optionally, labs.
    pub async fn recommend(&self, request: &SupplementRecommendRequest) -> Result<JsonMap> {
        self.client.post("/supplement/recommend", request).await
    }

    /// Checks supplements against each other and against medications.
    pub async fn check_interactions(&self, request: &InteractionCheckRequest) -> Result<JsonMap> {
        self.client.post("/supplement/interactions", request).await
    }
}
