use crate::{types::PaymentIntentRequest, BondMcpClient, JsonMap, Result};

pub struct PaymentsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    pub async fn create_intent(&self, request: &PaymentIntentRequest) -> Result<JsonMap> {
        self.client.post("/payments/create-intent", request).await
    }
}
