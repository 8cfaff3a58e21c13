//! Session-layer configuration (ambient stack, not specified by
//! spec.md): bind address, AI pacing, and the blind/buy-in bounds spec
//! §6 puts on `POST /api/games/single-play`. Loaded from environment
//! variables with defaults and validated once at startup, grounded in
//! `axiomind_web`'s `AppSettings`/`SettingsStore` validate-on-construct
//! pattern, adapted from a runtime-mutable store to a start-of-day
//! immutable config since this spec has no settings-update endpoint.

use std::net::SocketAddr;
use std::ops::RangeInclusive;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Randomized per-AI-action delay, for realism (spec §4.9).
    pub ai_think_delay_ms: RangeInclusive<u64>,
    /// Safety bound on consecutive AI turns per human action (spec §4.9).
    pub max_ai_iterations: usize,
    pub min_big_blind: u32,
    pub max_big_blind: u32,
    pub min_buy_in: u32,
    pub max_buy_in: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            ai_think_delay_ms: 150..=400,
            max_ai_iterations: 64,
            min_big_blind: 10,
            max_big_blind: 1000,
            min_buy_in: 1000,
            max_buy_in: 100_000,
        }
    }
}

impl ServerConfig {
    /// Builds config from environment variables, falling back to
    /// defaults, and validates it before returning.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("POKER_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e| ConfigError::Invalid {
                field: "POKER_BIND_ADDR",
                reason: format!("{e}"),
            })?;
        }
        if let Ok(v) = std::env::var("POKER_MAX_AI_ITERATIONS") {
            config.max_ai_iterations = v.parse().map_err(|e| ConfigError::Invalid {
                field: "POKER_MAX_AI_ITERATIONS",
                reason: format!("{e}"),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_big_blind == 0 || self.min_big_blind > self.max_big_blind {
            return Err(ConfigError::Invalid {
                field: "big_blind range",
                reason: "min_big_blind must be > 0 and <= max_big_blind".to_string(),
            });
        }
        if self.min_buy_in == 0 || self.min_buy_in > self.max_buy_in {
            return Err(ConfigError::Invalid {
                field: "buy_in range",
                reason: "min_buy_in must be > 0 and <= max_buy_in".to_string(),
            });
        }
        if self.max_ai_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "max_ai_iterations",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Validates a `POST /api/games/single-play` request body against
    /// spec §6's `big_blind∈[10,1000]`, `buy_in∈[1000,100000]` ranges.
    pub fn validate_single_play_request(
        &self,
        big_blind: u32,
        buy_in: u32,
    ) -> Result<(), ConfigError> {
        if !(self.min_big_blind..=self.max_big_blind).contains(&big_blind) {
            return Err(ConfigError::Invalid {
                field: "big_blind",
                reason: format!(
                    "must be within [{}, {}]",
                    self.min_big_blind, self.max_big_blind
                ),
            });
        }
        if !(self.min_buy_in..=self.max_buy_in).contains(&buy_in) {
            return Err(ConfigError::Invalid {
                field: "buy_in",
                reason: format!("must be within [{}, {}]", self.min_buy_in, self.max_buy_in),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_big_blind_outside_range() {
        let config = ServerConfig::default();
        assert!(config.validate_single_play_request(5, 1000).is_err());
        assert!(config.validate_single_play_request(1001, 1000).is_err());
    }

    #[test]
    fn rejects_buy_in_outside_range() {
        let config = ServerConfig::default();
        assert!(config.validate_single_play_request(100, 999).is_err());
        assert!(config.validate_single_play_request(100, 100_001).is_err());
    }

    #[test]
    fn accepts_values_inside_range() {
        let config = ServerConfig::default();
        assert!(config.validate_single_play_request(100, 10_000).is_ok());
    }
}
