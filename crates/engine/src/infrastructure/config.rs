//! Process configuration read from the environment.

use std::net::SocketAddr;

/// Default per-connection outbound buffer.
pub const DEFAULT_SESSION_CHANNEL_BUFFER: usize = 256;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite:mud.db";

/// Where the world is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Lost on restart
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub storage: StorageConfig,
    /// `None` disables CORS handling; `Some("*")` allows any origin.
    pub cors_allowed_origins: Option<String>,
    pub session_channel_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            storage: StorageConfig::Sqlite {
                path: "mud.db".to_string(),
            },
            cors_allowed_origins: None,
            session_channel_buffer: DEFAULT_SESSION_CHANNEL_BUFFER,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.server_host);

        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid SERVER_PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let storage = parse_storage(&database_url).unwrap_or_else(|| {
            tracing::warn!(value = %database_url, "Invalid DATABASE_URL, using {}", DEFAULT_DATABASE_URL);
            defaults.storage
        });

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let session_channel_buffer = match lookup("SESSION_CHANNEL_BUFFER") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "Invalid SESSION_CHANNEL_BUFFER, using {}",
                        DEFAULT_SESSION_CHANNEL_BUFFER
                    );
                    DEFAULT_SESSION_CHANNEL_BUFFER
                }
            },
            None => DEFAULT_SESSION_CHANNEL_BUFFER,
        };

        Self {
            server_host,
            server_port,
            storage,
            cors_allowed_origins,
            session_channel_buffer,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }
}

fn parse_storage(url: &str) -> Option<StorageConfig> {
    let url = url.trim();
    if url.eq_ignore_ascii_case("memory") {
        return Some(StorageConfig::Memory);
    }
    let path = url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    if path.is_empty() {
        return None;
    }
    Some(StorageConfig::Sqlite {
        path: path.to_string(),
    })
}
