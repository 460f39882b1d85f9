//! Container configuration.
//!
//! Tunes the resolver itself; bindings are always registered in code.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};

/// Environment variable overriding [`ContainerConfig::max_depth`].
pub const ENV_MAX_DEPTH: &str = "FERROUS_CONTAINER_MAX_DEPTH";
/// Environment variable overriding [`ContainerConfig::cache_plans`].
pub const ENV_CACHE_PLANS: &str = "FERROUS_CONTAINER_CACHE_PLANS";
/// Environment variable overriding [`ContainerConfig::register_as_current`].
pub const ENV_REGISTER_CURRENT: &str = "FERROUS_CONTAINER_REGISTER_CURRENT";

/// Resolver settings
///
/// # Examples
///
/// ```
/// use ferrous_container::{Container, ContainerConfig};
///
/// let config = ContainerConfig::default()
///     .with_max_depth(64)
///     .with_plan_cache(false);
/// let container = Container::with_config(config);
/// assert_eq!(container.config().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Maximum number of nested `get` calls in flight per container and thread
    pub max_depth: usize,
    /// Memoize construction plans per concrete type
    pub cache_plans: bool,
    /// Become the process-wide current instance on construction
    pub register_as_current: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            cache_plans: true,
            register_as_current: true,
        }
    }
}

impl ContainerConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_plan_cache(mut self, enabled: bool) -> Self {
        self.cache_plans = enabled;
        self
    }

    pub fn with_register_as_current(mut self, enabled: bool) -> Self {
        self.register_as_current = enabled;
        self
    }

    /// Defaults overridden by the `FERROUS_CONTAINER_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values returned from `lookup`.
    ///
    /// ```
    /// use ferrous_container::ContainerConfig;
    ///
    /// let config = ContainerConfig::from_lookup(|key| match key {
    ///     "FERROUS_CONTAINER_MAX_DEPTH" => Some("32".to_string()),
    ///     "FERROUS_CONTAINER_CACHE_PLANS" => Some("off".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.max_depth, 32);
    /// assert!(!config.cache_plans);
    /// assert!(config.register_as_current);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> DiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = raw.trim().parse().map_err(|_| {
                DiError::Config(format!("{} is not an integer: {}", ENV_MAX_DEPTH, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_CACHE_PLANS) {
            config.cache_plans = parse_flag(ENV_CACHE_PLANS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REGISTER_CURRENT) {
            config.register_as_current = parse_flag(ENV_REGISTER_CURRENT, &raw)?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> DiResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DiError::Config(format!("{} is not a boolean: {}", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = ContainerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ContainerConfig::default());
    }

    #[test]
    fn invalid_depth_is_rejected() {
        let err = ContainerConfig::from_lookup(|key| {
            (key == ENV_MAX_DEPTH).then(|| "deep".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, DiError::Config(_)));
        assert_eq!(
            err.to_string(),
            format!("Invalid configuration: {} is not an integer: deep", ENV_MAX_DEPTH)
        );
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("k", "Yes").unwrap());
        assert!(!parse_flag("k", " 0 ").unwrap());
        assert!(matches!(parse_flag("k", "maybe"), Err(DiError::Config(_))));
    }
}
