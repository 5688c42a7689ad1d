use serde::{Deserialize, Serialize};

const ADMIN_URL_VAR: &str = "ODONTO_ADMIN_API_URL";
const PATIENTS_URL_VAR: &str = "ODONTO_PATIENTS_API_URL";

const DEFAULT_ADMIN_URL: &str = "http://localhost:8082";
const DEFAULT_PATIENTS_URL: &str = "http://localhost:8081";

/// Base URLs of the two backend services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backends {
    pub admin_url: String,
    pub patients_url: String,
}

impl Backends {
    /// Read base URLs from the environment, falling back to the local
    /// development defaults. Trailing slashes are stripped so path
    /// joining stays uniform.
    pub fn from_env() -> Self {
        Self {
            admin_url: env_url(ADMIN_URL_VAR, DEFAULT_ADMIN_URL),
            patients_url: env_url(PATIENTS_URL_VAR, DEFAULT_PATIENTS_URL),
        }
    }

    pub fn new(admin_url: impl Into<String>, patients_url: impl Into<String>) -> Self {
        Self {
            admin_url: strip_slash(admin_url.into()),
            patients_url: strip_slash(patients_url.into()),
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_URL, DEFAULT_PATIENTS_URL)
    }
}

fn env_url(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => strip_slash(v.trim().to_string()),
        _ => default.to_string(),
    }
}

fn strip_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
