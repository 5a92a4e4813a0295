//! Client configuration: an optional TOML file overridden by environment
//! variables. A missing file is fine; a malformed one is an error rather
//! than a silent default.

use crate::error::CliError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STATE_PATH: &str = ".pdl/state.db";
pub const DEFAULT_CONFIG_PATH: &str = ".pdl/config.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    state_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub state_path: String,
}

fn load_file(path: &Path) -> Result<ConfigFile, CliError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigFile::default());
        }
        Err(err) => {
            return Err(CliError::Config {
                message: format!("{}: {err}", path.display()),
            });
        }
    };
    toml::from_str(&content).map_err(|err| CliError::Config {
        message: format!("{}: {err}", path.display()),
    })
}

pub fn load() -> Result<Config, CliError> {
    let config_path =
        std::env::var("PDL_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let file = load_file(Path::new(&config_path))?;

    let base_url = std::env::var("PDL_API_BASE_URL")
        .ok()
        .or(file.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&base_url).map_err(|err| CliError::Config {
        message: format!("invalid base url {base_url}: {err}"),
    })?;

    let state_path = std::env::var("PDL_STATE_PATH")
        .ok()
        .or(file.state_path)
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());

    Ok(Config {
        base_url,
        state_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let file = load_file(Path::new("/nonexistent/pdl-config.toml")).unwrap();
        assert!(file.base_url.is_none());
        assert!(file.state_path.is_none());
    }

    #[test]
    fn parses_known_keys() {
        let parsed: ConfigFile =
            toml::from_str("base_url = \"https://pdl.example.com\"\n").unwrap();
        assert_eq!(parsed.base_url.as_deref(), Some("https://pdl.example.com"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let result: Result<ConfigFile, _> = toml::from_str("base_url = [");
        assert!(result.is_err());
    }
}
