use serde::{Deserialize, Serialize};
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub log_level: String,
    pub metrics_addr: Option<String>,
    pub data_dir: String,
    pub monitor_interval_secs: u64,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name = env_var("RESQ_SERVICE_NAME", default_service_name.to_string());
        let environment = Environment::from_env(&env_var("RESQ_ENV", "local".to_string()));
        let log_level = env_var("RESQ_LOG_LEVEL", "info".to_string());
        let metrics_addr = env::var("RESQ_METRICS_ADDR").ok();
        let data_dir = env_var("RESQ_DATA_DIR", "/var/lib/resq".to_string());
        let monitor_interval_secs = env_var_u64("RESQ_MONITOR_INTERVAL_SECS", 60);

        Self {
            service_name,
            environment,
            log_level,
            metrics_addr,
            data_dir,
            monitor_interval_secs,
        }
    }
}

/// External vision/decision collaborator. Absent endpoint means media
/// analysis degrades to unsuccessful outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl VisionConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("RESQ_VISION_ENDPOINT").ok(),
            api_key: env::var("RESQ_VISION_API_KEY").ok(),
            timeout_secs: env_var_u64("RESQ_VISION_TIMEOUT_SECS", 30),
        }
    }
}

fn env_var(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
