use anyhow::{anyhow, bail, Result};

const DEFAULT_REGION: &str = "ap-south-1";
// Port 5001 avoids the AirPlay conflict on macOS dev machines.
const DEFAULT_PORT: u16 = 5001;

const REQUIRED_VARS: &[&str] = &[
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "KB_ID",
    "MODEL_ARN",
];

/// Process configuration, read once at startup and never mutated.
#[derive(Clone)]
pub struct AppConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub knowledge_base_id: String,
    pub model_arn: String,
    pub port: u16,
}

impl AppConfig {
    /// Fail fast before binding: a gateway with no knowledge base or
    /// credentials cannot serve anything useful.
    pub fn from_env() -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| {
                dotenvy::var(var)
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .collect();

        if !missing.is_empty() {
            bail!("Missing env vars: {}", missing.join(", "));
        }

        Ok(Self {
            access_key_id: dotenvy::var("AWS_ACCESS_KEY_ID")?,
            secret_access_key: dotenvy::var("AWS_SECRET_ACCESS_KEY")?,
            region: dotenvy::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            knowledge_base_id: dotenvy::var("KB_ID")?,
            model_arn: dotenvy::var("MODEL_ARN")?,
            port: parse_port(dotenvy::var("PORT").ok())?,
        })
    }
}

// An unset PORT falls back to the default, but a set-and-unparsable one
// aborts startup like the other bad variables do.
fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid PORT value: {raw}")),
        None => Ok(DEFAULT_PORT),
    }
}
