use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;
/// Default burst size for `/decrypt` per client IP.
pub const DEFAULT_DECRYPT_BURST: u32 = 20;
/// Default replenish interval for `/decrypt`, in milliseconds.
pub const DEFAULT_DECRYPT_REPLENISH_MS: u64 = 250;

/// Per-IP rate limit applied to the decrypt route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed in a burst.
    pub burst_size: u32,
    /// One request is replenished every `replenish_ms` milliseconds.
    pub replenish_ms: u64,
}

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The secret the video identifier key is derived from.
    pub encryption_secret: Zeroizing<String>,
    /// The socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Optional JSON catalog file. The built-in catalog is used when `None`.
    pub lessons_file: Option<PathBuf>,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Rate limit for `/decrypt`. `None` disables it.
    pub decrypt_rate_limit: Option<RateLimitConfig>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new `Config` from an arbitrary variable source.
    ///
    /// `ENCRYPTION_KEY` is mandatory: the service refuses to start with a
    /// built-in default secret.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let encryption_secret = lookup("ENCRYPTION_KEY")
            .filter(|s| !s.trim().is_empty())
            .map(Zeroizing::new)
            .context("ENCRYPTION_KEY must be set (generate with: openssl rand -hex 32)")?;

        let host: IpAddr = lookup("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse()
            .context("Invalid HOST")?;

        let port: u16 = match lookup("PORT") {
            Some(port) => port.parse().context("Invalid PORT")?,
            None => DEFAULT_PORT,
        };

        let lessons_file = lookup("LESSONS_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let burst_size: u32 = match lookup("DECRYPT_RATE_LIMIT_BURST") {
            Some(v) => v.parse().context("Invalid DECRYPT_RATE_LIMIT_BURST")?,
            None => DEFAULT_DECRYPT_BURST,
        };
        let replenish_ms: u64 = match lookup("DECRYPT_RATE_LIMIT_REPLENISH_MS") {
            Some(v) => v.parse().context("Invalid DECRYPT_RATE_LIMIT_REPLENISH_MS")?,
            None => DEFAULT_DECRYPT_REPLENISH_MS,
        };
        if replenish_ms == 0 {
            anyhow::bail!("DECRYPT_RATE_LIMIT_REPLENISH_MS must be greater than zero");
        }

        let decrypt_rate_limit = (burst_size > 0).then_some(RateLimitConfig {
            burst_size,
            replenish_ms,
        });

        Ok(Self {
            encryption_secret,
            bind_addr: SocketAddr::new(host, port),
            lessons_file,
            cors_allowed_origins,
            decrypt_rate_limit,
        })
    }
}
