//! Resource facades.
//!
//! Each facade borrows the client, shapes a typed payload into JSON and
//! forwards it to the request executor with a fixed method and path.

mod ask;
mod health;
mod imports;
mod insights;
mod keys;
mod labs;
mod orchestrate;
mod payments;
mod records;
mod supplements;
mod wearables;

pub use ask::AskApi;
pub use health::HealthApi;
pub use imports::{ChatApi, ImportsApi};
pub use insights::InsightsApi;
pub use keys::ApiKeysApi;
pub use labs::LabsApi;
pub use orchestrate::{OrchestrateApi, ToolsApi};
pub use payments::PaymentsApi;
pub use records::MedicalRecordsApi;
pub use supplements::SupplementsApi;
pub use wearables::WearablesApi;
