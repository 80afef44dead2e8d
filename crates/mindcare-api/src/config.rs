//! Startup configuration, read once from the environment.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use jiff::SignedDuration;
use thiserror::Error;

use mindcare_coach::{bedrock, openrouter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name}={value:?} is invalid: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    S3,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachBackend {
    OpenRouter,
    Bedrock,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub jwt_secret: String,
    pub store: StoreBackend,
    pub bucket: String,
    pub s3_region: Option<String>,
    pub bind: SocketAddr,
    pub token_ttl: SignedDuration,
    pub inactivity_timeout: SignedDuration,
    pub coach_provider: CoachBackend,
    pub openrouter_key: String,
    pub openrouter_model: String,
    pub bedrock_model_id: String,
    pub recommendation_timeout: Duration,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("jwt_secret", &"<redacted>")
            .field("store", &self.store)
            .field("bucket", &self.bucket)
            .field("s3_region", &self.s3_region)
            .field("bind", &self.bind)
            .field("token_ttl", &self.token_ttl)
            .field("inactivity_timeout", &self.inactivity_timeout)
            .field("coach_provider", &self.coach_provider)
            .field("openrouter_key", &"<redacted>")
            .field("openrouter_model", &self.openrouter_model)
            .field("bedrock_model_id", &self.bedrock_model_id)
            .field("recommendation_timeout", &self.recommendation_timeout)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let store = match var("MINDCARE_STORE").as_deref() {
            None | Some("s3") => StoreBackend::S3,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "MINDCARE_STORE",
                    value: other.to_string(),
                    reason: "expected `s3` or `memory`".to_string(),
                });
            }
        };

        let coach_provider = match var("COACH_PROVIDER").as_deref() {
            None | Some("openrouter") => CoachBackend::OpenRouter,
            Some("bedrock") => CoachBackend::Bedrock,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "COACH_PROVIDER",
                    value: other.to_string(),
                    reason: "expected `openrouter` or `bedrock`".to_string(),
                });
            }
        };

        let bind = match var("MINDCARE_BIND") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Invalid {
                    name: "MINDCARE_BIND",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        Ok(Self {
            jwt_secret,
            store,
            bucket: var("MINDCARE_BUCKET").unwrap_or_else(|| "mindcare".to_string()),
            s3_region: var("MINDCARE_S3_REGION"),
            bind,
            token_ttl: SignedDuration::from_hours(positive(&var, "TOKEN_TTL_HOURS", 168)?),
            inactivity_timeout: SignedDuration::from_hours(positive(
                &var,
                "INACTIVITY_TIMEOUT_HOURS",
                24,
            )?),
            coach_provider,
            openrouter_key: var("OPENROUTER_KEY").unwrap_or_default(),
            openrouter_model: var("OPENROUTER_MODEL")
                .unwrap_or_else(|| openrouter::DEFAULT_MODEL.to_string()),
            bedrock_model_id: var("BEDROCK_MODEL_ID")
                .unwrap_or_else(|| bedrock::DEFAULT_MODEL_ID.to_string()),
            recommendation_timeout: Duration::from_secs(positive(
                &var,
                "RECOMMENDATION_TIMEOUT_SECS",
                90,
            )?),
        })
    }
}

fn positive<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: fmt::Display,
{
    let Some(raw) = var(name) else {
        return Ok(default);
    };
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: raw.clone(),
        reason,
    };
    let value: T = raw.trim().parse().map_err(|e: T::Err| invalid(e.to_string()))?;
    if value <= T::default() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(value)
}
