use crate::error::CliError;
use owo_colors::OwoColorize;
use pdl_api::ApiClient;

pub async fn list(client: &ApiClient, query: Option<String>) -> Result<(), CliError> {
    let companies = pdl_api::companies::list_companies(client, query.as_deref()).await?;
    if companies.is_empty() {
        println!("No companies found");
        return Ok(());
    }
    for company in companies {
        let location = match (&company.city, &company.state) {
            (Some(city), Some(state)) => format!(" - {city}/{state}"),
            (Some(city), None) => format!(" - {city}"),
            _ => String::new(),
        };
        let inactive = if company.active == Some(false) {
            format!(" [{}]", "inactive".red())
        } else {
            String::new()
        };
        println!("{:>5}  {}{location}{inactive}", company.id, company.name);
    }
    Ok(())
}
