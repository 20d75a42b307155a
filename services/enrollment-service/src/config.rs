/// Configuration management
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    /// Key id advertised in service-token headers and the discovery
    /// document.
    #[serde(default = "default_key_id")]
    pub key_id: String,
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,
    #[serde(default = "default_public_key_path")]
    pub public_key_path: String,
    /// Externally reachable base URL for the `jku` in self-minted tokens.
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "default_student_service_url")]
    pub student_service_url: String,
    #[serde(default = "default_course_service_url")]
    pub course_service_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn jku(&self) -> String {
        let base = self
            .public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server_port));
        format!("{base}/.well-known/jwks.json")
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5005
}

fn default_key_id() -> String {
    "1".to_string()
}

fn default_private_key_path() -> String {
    "keys/private.pem".to_string()
}

fn default_public_key_path() -> String {
    "keys/public.pem".to_string()
}

fn default_student_service_url() -> String {
    "http://localhost:5003/api/students".to_string()
}

fn default_course_service_url() -> String {
    "http://localhost:5004/api/courses".to_string()
}
