use crate::client::ApiClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;
use pdl_core::types::{CompanyId, TrainingProgram};

/// Programs ("PDLs") belonging to one company, finalized ones included.
pub async fn list_company_programs(
    client: &ApiClient,
    company_id: CompanyId,
) -> Result<Vec<TrainingProgram>, ApiError> {
    let path = format!("/api/programs/company/{company_id}");
    let envelope: ListEnvelope<TrainingProgram> = client.get_json(&path, &[]).await?;
    Ok(envelope.into_items())
}
