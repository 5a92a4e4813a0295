use crate::client::ApiClient;
use crate::error::ApiError;
use pdl_core::types::{CompanyId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub company_id: CompanyId,
    pub company_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthenticatedUser,
}

/// Authenticate and install the returned token on the client.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
    company: Option<&str>,
) -> Result<LoginResponse, ApiError> {
    let payload = LoginRequest {
        email,
        password,
        company,
    };
    let response: LoginResponse = client.post_json("/api/auth/login", &payload).await?;
    client.set_token(&response.token);
    Ok(response)
}

/// Check that the current token is still accepted.
pub async fn verify(client: &ApiClient) -> Result<(), ApiError> {
    client.get_ok("/api/auth/verify").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_omits_absent_company() {
        let with = LoginRequest {
            email: "ana@example.com",
            password: "secret",
            company: Some("ic2"),
        };
        let json = serde_json::to_value(&with).unwrap();
        assert_eq!(json["company"], "ic2");

        let without = LoginRequest {
            email: "ana@example.com",
            password: "secret",
            company: None,
        };
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("company").is_none());
    }

    #[test]
    fn login_response_decodes() {
        let body = r#"{
            "token": "jwt-abc",
            "user": {"id": 10, "email": "ana@example.com", "companyId": 3, "companyName": "IC2 Evolutiva"}
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.token, "jwt-abc");
        assert_eq!(response.user.company_name, "IC2 Evolutiva");
    }
}
