use std::env;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("TRIPDESK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("TRIPDESK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("TRIPDESK_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("TRIPDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let auto_confirm = match env::var("TRIPDESK_AUTO_CONFIRM") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidFlag {
                name: "TRIPDESK_AUTO_CONFIRM",
            })?,
            Err(_) => true,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            booking: BookingConfig { auto_confirm },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Booking workflow policy knobs.
///
/// When `auto_confirm` is off every new reservation stays pending until a
/// coordinator resolves it, even when the calendar was clear.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub auto_confirm: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TRIPDESK_PORT must be a valid u16 port number")]
    InvalidPort,
    #[error("TRIPDESK_HOST is not a valid IP address or 'localhost'")]
    InvalidHost { source: std::net::AddrParseError },
    #[error("{name} must be a boolean flag (true/false)")]
    InvalidFlag { name: &'static str },
}
