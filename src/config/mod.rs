//! Configuration loading and management

use crate::core::ResourceType;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the catalog API, without trailing slash (e.g., "https://swapi.dev/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to each upstream call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Related-item expansion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    /// Number of related URLs consumed when the request carries no `limit`
    #[serde(default = "default_related_cap")]
    pub default_cap: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            default_cap: default_related_cap(),
        }
    }
}

/// Accepted range for the `limit` query parameter (inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitBounds {
    #[serde(default = "default_limit_min")]
    pub min: usize,

    #[serde(default = "default_limit_max")]
    pub max: usize,
}

impl Default for LimitBounds {
    fn default() -> Self {
        Self {
            min: default_limit_min(),
            max: default_limit_max(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Complete configuration for the proxy
///
/// Loaded once at startup and shared read-only (behind an `Arc`) by every
/// request handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Resource types callers may query and related URLs may point to
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceType>,

    #[serde(default)]
    pub related: RelatedConfig,

    #[serde(default)]
    pub limits: LimitBounds,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_base_url() -> String {
    "https://swapi.dev/api".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

fn default_related_cap() -> usize {
    10
}

fn default_limit_min() -> usize {
    1
}

fn default_limit_max() -> usize {
    50
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_resources() -> Vec<ResourceType> {
    ResourceType::ALL.to_vec()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ProxyConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.normalized()
    }

    /// Configuration pointing at the public SWAPI instance
    pub fn default_config() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            resources: default_resources(),
            related: RelatedConfig::default(),
            limits: LimitBounds::default(),
            server: ServerConfig::default(),
        }
    }

    /// Same configuration with a different upstream base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.upstream.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check whether a resource type is served by this proxy
    pub fn is_allowed(&self, resource: ResourceType) -> bool {
        self.resources.contains(&resource)
    }

    /// Comma-separated list of allowed resources, in enumeration order
    pub fn allowed_list(&self) -> String {
        ResourceType::ALL
            .iter()
            .filter(|r| self.is_allowed(**r))
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn normalized(mut self) -> Result<Self> {
        self.upstream.base_url = self.upstream.base_url.trim_end_matches('/').to_string();

        if self.limits.min == 0 || self.limits.min > self.limits.max {
            anyhow::bail!(
                "invalid limit bounds: min={} max={}",
                self.limits.min,
                self.limits.max
            );
        }

        Ok(self)
    }
}
