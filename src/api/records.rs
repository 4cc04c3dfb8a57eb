use crate::{types::MedicalRecordRequest, BondMcpClient, JsonMap, Result};

/// Medical record text analysis and entity extraction.
pub struct MedicalRecordsApi<'a> {
    client: &'a BondMcpClient,
}

impl<'a> MedicalRecordsApi<'a> {
    pub(crate) fn new(client: &'a BondMcpClient) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, request: &MedicalRecordRequest) -> Result<JsonMap> {
        self.client.post("/v1/analyze-medical-record", request).await
    }
}
