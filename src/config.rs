//! Configuration loader for the `airquality-dash` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate reads the environment.
//!
use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Result};

use crate::generator::DEFAULT_WINDOW_DAYS;

/// Parse an optional variable into `$ty`, yielding `None` when unset.
macro_rules! parse_var_opt {
    ($lookup:expr, $var_name:expr, $ty:ty) => {
        $lookup($var_name)
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Parse an optional variable into `$ty` with a default value.
macro_rules! parse_var {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        parse_var_opt!($lookup, $var_name, $ty).unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Seed for a shared, reproducible random stream. `None` means every
    /// request draws from a fresh entropy-seeded generator.
    pub rng_seed: Option<u64>,

    /// Length of the trailing window for historical series.
    pub history_window_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            rng_seed: None,
            history_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listener address (default: `0.0.0.0:8080`)
/// - `AQI_RNG_SEED` – u64 seed for a shared reproducible stream (default: unset)
/// - `HISTORY_WINDOW_DAYS` – trailing window length, > 0 (default: 30)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    load_from(|name| env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let defaults = Config::default();

    let bind_addr = parse_var!(lookup, "BIND_ADDR", SocketAddr, defaults.bind_addr);
    let rng_seed = parse_var_opt!(lookup, "AQI_RNG_SEED", u64);
    let history_window_days = parse_var!(
        lookup,
        "HISTORY_WINDOW_DAYS",
        u32,
        defaults.history_window_days
    );

    if history_window_days == 0 {
        return Err(anyhow!("Invalid HISTORY_WINDOW_DAYS: must be greater than 0"));
    }

    Ok(Config {
        bind_addr,
        rng_seed,
        history_window_days,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let seed = match self.rng_seed {
            Some(seed) => seed.to_string(),
            None => "(entropy per request)".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR           : {}", self.bind_addr);
        tracing::info!("  AQI_RNG_SEED        : {}", seed);
        tracing::info!("  HISTORY_WINDOW_DAYS : {}", self.history_window_days);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        // ---
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        // ---
        let cfg = load_from(lookup_from(&[])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.rng_seed, None);
        assert_eq!(cfg.history_window_days, 30);
    }

    #[test]
    fn test_overrides() {
        // ---
        let cfg = load_from(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("AQI_RNG_SEED", "42"),
            ("HISTORY_WINDOW_DAYS", "7"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.rng_seed, Some(42));
        assert_eq!(cfg.history_window_days, 7);
    }

    #[test]
    fn test_invalid_values() {
        // ---
        assert!(load_from(lookup_from(&[("BIND_ADDR", "nowhere")])).is_err());
        assert!(load_from(lookup_from(&[("AQI_RNG_SEED", "-1")])).is_err());
        assert!(load_from(lookup_from(&[("HISTORY_WINDOW_DAYS", "0")])).is_err());
    }
}
