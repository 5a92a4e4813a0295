use crate::commands::require_session;
use crate::error::CliError;
use chrono::{Duration, Utc};
use pdl_api::ApiClient;
use pdl_store::{RememberMe, SessionState, StateStore};

const REMEMBER_ME_DAYS: i64 = 30;

pub async fn login(
    client: &ApiClient,
    store: &StateStore,
    email: Option<String>,
    password: String,
    company: Option<String>,
    remember: bool,
) -> Result<(), CliError> {
    let remembered = store.remember_me()?;
    let email = email
        .or_else(|| remembered.as_ref().and_then(RememberMe::email))
        .ok_or_else(|| CliError::MissingContext {
            message: "no email given and none remembered. Pass --email".to_string(),
        })?;
    let company = company.or_else(|| remembered.as_ref().map(|r| r.company.clone()));

    let response = pdl_api::auth::login(client, &email, &password, company.as_deref()).await?;
    store.set_token(&response.token)?;
    store.set_session(&SessionState {
        email: response.user.email.clone(),
        user_id: response.user.id,
        company_id: response.user.company_id,
        company_name: response.user.company_name.clone(),
        logged_at: Utc::now(),
    })?;

    if remember {
        let expires_at = Utc::now() + Duration::days(REMEMBER_ME_DAYS);
        store.set_remember_me(&RememberMe::new(
            &email,
            company.as_deref().unwrap_or_default(),
            expires_at,
        ))?;
    } else {
        store.clear_remember_me()?;
    }

    println!(
        "Logged in as {} ({})",
        response.user.email, response.user.company_name
    );
    Ok(())
}

pub fn logout(store: &StateStore) -> Result<(), CliError> {
    store.clear_session()?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(client: &ApiClient, store: &StateStore) -> Result<(), CliError> {
    let session = require_session(store)?;
    pdl_api::auth::verify(client).await?;
    println!(
        "{} ({}) - logged in at {}",
        session.email,
        session.company_name,
        session.logged_at.format("%d/%m/%Y %H:%M")
    );
    Ok(())
}
