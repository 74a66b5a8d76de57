use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::{info, warn};

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            planner: PlannerConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const HOST_VAR: &'static str = "LOAD_PLANNER_API_HOST";
    const PORT_VAR: &'static str = "LOAD_PLANNER_API_PORT";
    const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    const DEFAULT_PORT: u16 = 8080;

    fn from_env() -> Self {
        let (bind_ip, display_host) = match env_string(Self::HOST_VAR) {
            Some(raw) => match raw.parse::<IpAddr>() {
                Ok(ip) => (ip, raw),
                Err(err) => {
                    warn!(
                        "Could not parse {} ('{}'): {}. Using {}.",
                        Self::HOST_VAR,
                        raw,
                        err,
                        Self::DEFAULT_HOST
                    );
                    (Self::DEFAULT_HOST, Self::DEFAULT_HOST.to_string())
                }
            },
            None => (Self::DEFAULT_HOST, Self::DEFAULT_HOST.to_string()),
        };

        let port = env_string(Self::PORT_VAR)
            .map(|raw| match parse_port(&raw) {
                Ok(port) => port,
                Err(hint) => {
                    warn!(
                        "{} contains invalid value '{}': {}. Using {}.",
                        Self::PORT_VAR,
                        raw,
                        hint,
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            })
            .unwrap_or(Self::DEFAULT_PORT);

        Self {
            bind_ip,
            display_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_ip: Self::DEFAULT_HOST,
            display_host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
        }
    }
}

/// Behaviour of the loading calculator as exposed over HTTP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    strict_units: bool,
}

impl PlannerConfig {
    const STRICT_UNITS_VAR: &'static str = "LOAD_PLANNER_STRICT_UNITS";

    fn from_env() -> Self {
        let strict_units = env_string(Self::STRICT_UNITS_VAR)
            .and_then(|raw| parse_bool(&raw, Self::STRICT_UNITS_VAR))
            .unwrap_or(false);

        if strict_units {
            info!("Strict unit validation enabled: unknown unit tags are rejected");
        }

        Self { strict_units }
    }

    /// Sets whether unknown unit tags are rejected instead of read as meters.
    pub fn with_strict_units(mut self, strict: bool) -> Self {
        self.strict_units = strict;
        self
    }

    pub fn strict_units(&self) -> bool {
        self.strict_units
    }
}

/// Default log filter, used when `RUST_LOG` is not set.
///
/// Kept outside `AppConfig` because it has to be read before logging exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelemetryConfig {
    log_level: String,
}

impl TelemetryConfig {
    const LOG_VAR: &'static str = "LOAD_PLANNER_LOG";
    const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Reads the log level. Runs before the subscriber exists, so it never logs.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var(Self::LOG_VAR)
                .ok()
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!("Access to {} failed: {}. Using default value.", name, err);
            None
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Err("must not be 0".to_string()),
        Ok(port) => Ok(port),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            warn!(
                "Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}
