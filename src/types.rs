use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::JsonMap;

/// Model routing preference for `/ask`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPreference {
    Consensus,
    Claude,
    Gpt4,
    Medlm,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_citations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_preference: Option<ModelPreference>,
}

impl AskRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }
}

/// Lab panel interpretation request.
///
/// `lab_results` is forwarded as-is, typically an array of
/// `{"test_name", "value", "unit", "reference_range"}` objects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabInterpretRequest {
    pub lab_results: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_context: Option<JsonValue>,
}

impl LabInterpretRequest {
    pub fn new(lab_results: JsonValue) -> Self {
        Self {
            lab_results,
            patient_context: None,
        }
    }

    pub fn patient_context(mut self, context: JsonValue) -> Self {
        self.patient_context = Some(context);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SupplementRecommendRequest {
    pub health_goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_labs: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_supplements: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_context: Option<JsonValue>,
}

impl SupplementRecommendRequest {
    pub fn new<I, S>(health_goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            health_goals: health_goals.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InteractionCheckRequest {
    pub supplements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WearableAnalysisRequest {
    pub wearable_data: JsonValue,
    /// Device family, e.g. `oura`, `whoop`, `apple_health`.
    pub wearable_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MedicalRecordRequest {
    pub medical_record_text: String,
    pub extract_entities: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

impl MedicalRecordRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            medical_record_text: text.into(),
            extract_entities: true,
            confidence_threshold: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateApiKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentIntentRequest {
    /// Amount in the currency's minor unit.
    pub amount: u64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OrchestrateRequest {
    pub steps: Vec<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolCallRequest {
    pub tool: String,
    pub payload: JsonValue,
}
