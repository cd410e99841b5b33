// File: src/config.rs
// Purpose: Route table configuration from routekit.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::SyntaxError;
use crate::options::PatternOptions;
use crate::path::RoutePrefix;
use crate::Router;

/// Route table configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    /// Prefix prepended to every route (e.g., "/app")
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub options: PatternOptions,

    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSpec {
    pub pattern: String,

    /// Route name (default: the pattern text)
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form string metadata
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

/// Metadata attached to routes loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteMeta {
    pub name: String,
    pub meta: BTreeMap<String, String>,
}

impl RouteSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
            meta: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Name, falling back to the pattern text
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.pattern)
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./routekit.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("routekit.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RouterConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Compiles every route, in file order, into a router
    pub fn into_router(self) -> Result<Router<RouteMeta>, SyntaxError> {
        let prefix = RoutePrefix::new(self.prefix.unwrap_or_default());
        let mut router = Router::with_prefix(prefix).with_options(self.options);

        for spec in self.routes {
            let meta = RouteMeta {
                name: spec.name().to_string(),
                meta: spec.meta,
            };
            router.register(&spec.pattern, meta)?;
        }

        Ok(router)
    }
}
