//! Client configuration: where the backend lives and how long to wait for it.
//!
//! A `ClientConfig` is built once and handed to each client at construction;
//! nothing here is process-global.

use std::env;
use std::time::Duration;

use crate::error::ApiError;

pub const EMULATOR_URL: &str = "http://10.0.2.2:8080";
pub const LOCALHOST_URL: &str = "http://localhost:8080";
pub const PRODUCTION_URL: &str = "https://serbisyo-backend.onrender.com";
pub const PSGC_URL: &str = "https://psgc.gitlab.io/api";

const DEFAULT_LAN_PORT: u16 = 8080;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend is reachable from the device running the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEnvironment {
    /// Android emulator talking to the host machine's loopback.
    Emulator,
    /// Same machine as the backend.
    Localhost,
    /// Physical device on the developer's LAN.
    Lan { host: String, port: u16 },
    /// Deployed backend.
    Production,
    /// Anything else.
    Custom(String),
}

impl ApiEnvironment {
    pub fn base_url(&self) -> String {
        match self {
            ApiEnvironment::Emulator => EMULATOR_URL.to_string(),
            ApiEnvironment::Localhost => LOCALHOST_URL.to_string(),
            ApiEnvironment::Lan { host, port } => format!("http://{host}:{port}"),
            ApiEnvironment::Production => PRODUCTION_URL.to_string(),
            ApiEnvironment::Custom(url) => url.clone(),
        }
    }

    /// Parse `emulator`, `localhost`, `production`, `lan:<host>[:<port>]`,
    /// or an `http(s)://` URL.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "emulator" => return Ok(ApiEnvironment::Emulator),
            "localhost" | "local" => return Ok(ApiEnvironment::Localhost),
            "production" | "prod" => return Ok(ApiEnvironment::Production),
            _ => {}
        }
        if let Some(rest) = raw.strip_prefix("lan:") {
            let (host, port) = match rest.rsplit_once(':') {
                Some((host, port)) => {
                    let port = port
                        .parse()
                        .map_err(|_| ApiError::Validation(format!("invalid LAN port: {port}")))?;
                    (host, port)
                }
                None => (rest, DEFAULT_LAN_PORT),
            };
            if host.is_empty() {
                return Err(ApiError::Validation("LAN host is empty".to_string()));
            }
            return Ok(ApiEnvironment::Lan {
                host: host.to_string(),
                port,
            });
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(ApiEnvironment::Custom(raw.to_string()));
        }
        Err(ApiError::Validation(format!("unknown API environment: {raw}")))
    }
}

/// Everything a client needs to know before issuing its first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: format!("serbisyo-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn for_environment(environment: &ApiEnvironment) -> Self {
        Self::new(&environment.base_url())
    }

    /// Configuration for the public PSGC geographic lookup API.
    pub fn psgc() -> Self {
        Self::new(PSGC_URL).with_request_timeout(Duration::from_secs(60))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve configuration from the environment.
    ///
    /// `SERBISYO_API_URL` wins over `SERBISYO_ENV`; with neither set the
    /// production backend is used. Timeouts come from
    /// `SERBISYO_CONNECT_TIMEOUT_SECS` and `SERBISYO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match (lookup("SERBISYO_API_URL"), lookup("SERBISYO_ENV")) {
            (Some(url), _) if !url.trim().is_empty() => ApiEnvironment::Custom(url.trim().to_string()),
            (_, Some(name)) if !name.trim().is_empty() => ApiEnvironment::parse(&name)?,
            _ => ApiEnvironment::Production,
        };
        let mut config = Self::for_environment(&environment);
        if let Some(secs) = lookup("SERBISYO_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("SERBISYO_CONNECT_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("SERBISYO_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("SERBISYO_TIMEOUT_SECS", &secs)?;
        }
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(&ApiEnvironment::Production)
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, ApiError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ApiError::Validation(format!("{key} must be a positive number of seconds")))
}
