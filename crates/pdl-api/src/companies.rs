use crate::client::ApiClient;
use crate::envelope::ListEnvelope;
use crate::error::ApiError;
use pdl_core::types::Company;

/// Company directory, optionally filtered by a search term.
pub async fn list_companies(
    client: &ApiClient,
    query: Option<&str>,
) -> Result<Vec<Company>, ApiError> {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(q) = query {
        params.push(("q", q.to_string()));
    }
    let envelope: ListEnvelope<Company> = client.get_json("/api/companies", &params).await?;
    Ok(envelope.into_items())
}
