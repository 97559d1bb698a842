//! Service Configuration Module
//!
//! Per-service settings (base URI, timeout, cache TTL, debug flag) are keyed
//! by a config name; any field left unset falls back to the `default`
//! namespace. [`ConfigRepository::resolve`] produces the merged, read-only
//! [`ServiceConfig`] view a request is executed with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default config namespace. A provider must be bound to something else;
/// leaving it on the default is a wiring error.
pub const DEFAULT_CONFIG_NAME: &str = "default";

/// Transport timeout applied when neither the service nor the default
/// namespace sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw settings of one config namespace. All fields optional; durations
/// (de)serialize as whole seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSettings {
    pub base_uri: Option<String>,
    #[serde(default, with = "duration_option_serde")]
    pub timeout: Option<Duration>,
    #[serde(default, with = "duration_option_serde")]
    pub cache_ttl: Option<Duration>,
    pub debug: Option<bool>,
}

/// Settings for all namespaces plus the global force-debug switch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRepository {
    #[serde(default)]
    services: HashMap<String, ServiceSettings>,
    /// When set, debug logging is on for every service.
    #[serde(default)]
    force_debug: bool,
}

impl ConfigRepository {
    pub fn builder() -> ConfigRepositoryBuilder {
        ConfigRepositoryBuilder::default()
    }

    /// Resolve the effective configuration for one config name, field by
    /// field, falling back to the `default` namespace.
    pub fn resolve(&self, name: &str) -> ServiceConfig {
        let service = self.services.get(name);
        let defaults = self.services.get(DEFAULT_CONFIG_NAME);

        let pick = |f: fn(&ServiceSettings) -> Option<&str>| -> Option<String> {
            service
                .and_then(|s| f(s))
                .or_else(|| defaults.and_then(|s| f(s)))
                .map(str::to_string)
        };

        ServiceConfig {
            name: name.to_string(),
            base_uri: pick(|s| s.base_uri.as_deref()),
            timeout: service
                .and_then(|s| s.timeout)
                .or_else(|| defaults.and_then(|s| s.timeout))
                .unwrap_or(DEFAULT_TIMEOUT),
            cache_lifetime: service
                .and_then(|s| s.cache_ttl)
                .or_else(|| defaults.and_then(|s| s.cache_ttl)),
            debug: self.force_debug
                || service
                    .and_then(|s| s.debug)
                    .or_else(|| defaults.and_then(|s| s.debug))
                    .unwrap_or(false),
        }
    }
}

/// Builder for [`ConfigRepository`].
#[derive(Debug, Default)]
pub struct ConfigRepositoryBuilder {
    services: HashMap<String, ServiceSettings>,
    force_debug: bool,
}

impl ConfigRepositoryBuilder {
    /// Register the settings of one config namespace.
    pub fn service<S: Into<String>>(mut self, name: S, settings: ServiceSettings) -> Self {
        self.services.insert(name.into(), settings);
        self
    }

    /// Register the fallback namespace.
    pub fn defaults(self, settings: ServiceSettings) -> Self {
        self.service(DEFAULT_CONFIG_NAME, settings)
    }

    /// Turn debug logging on for every service.
    pub fn force_debug(mut self, force: bool) -> Self {
        self.force_debug = force;
        self
    }

    pub fn build(self) -> ConfigRepository {
        ConfigRepository {
            services: self.services,
            force_debug: self.force_debug,
        }
    }
}

/// Resolved, read-only configuration of one service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    name: String,
    base_uri: Option<String>,
    timeout: Duration,
    cache_lifetime: Option<Duration>,
    debug: bool,
}

impl ServiceConfig {
    /// Config name this view was resolved for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URI of the service, when configured.
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Hard transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// TTL for cached responses; `None` leaves the lifetime to the store.
    pub fn cache_lifetime(&self) -> Option<Duration> {
        self.cache_lifetime
    }

    /// Whether request/response debug logging is on for this service.
    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }
}

mod duration_option_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
