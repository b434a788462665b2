use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where doctors, appointments and records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Supabase,
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Supabase => write!(f, "supabase"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(StorageBackend::Supabase),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_api_key: String,
    pub storage_backend: StorageBackend,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let supabase_url = env::var("SUPABASE_URL")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_URL not set, using empty value");
                String::new()
            });
        let supabase_api_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_SERVICE_ROLE_KEY not set, using empty value");
                String::new()
            });

        let supabase_ready = !supabase_url.is_empty() && !supabase_api_key.is_empty();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!("{}, falling back to default", e);
                Self::default_backend(supabase_ready)
            }),
            Err(_) => Self::default_backend(supabase_ready),
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let bind_addr = format!("{}:{}", host, port)
            .parse()
            .unwrap_or_else(|_| {
                warn!("Invalid HOST/PORT ({}:{}), using 0.0.0.0:3000", host, port);
                SocketAddr::from(([0, 0, 0, 0], 3000))
            });

        let config = Self {
            supabase_url,
            supabase_api_key,
            storage_backend,
            bind_addr,
        };

        if config.storage_backend == StorageBackend::Supabase && !config.is_configured() {
            warn!("Supabase backend selected but not fully configured - missing environment variables");
        }

        config
    }

    fn default_backend(supabase_ready: bool) -> StorageBackend {
        if supabase_ready {
            StorageBackend::Supabase
        } else {
            StorageBackend::Memory
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_api_key.is_empty()
    }
}
