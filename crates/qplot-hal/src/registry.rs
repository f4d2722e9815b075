//! Backend registry for looking up backends by name.
//!
//! The [`BackendRegistry`] is the "provider" of the classic workflow:
//! callers ask it for a backend by name (`"qasm_simulator"`) and get back a
//! ready-to-use `Box<dyn Backend>`.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

/// Factory function type for registered backends.
type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Central registry for quantum backends.
pub struct BackendRegistry {
    /// Backend factories keyed by name.
    factories: FxHashMap<String, Factory>,
    /// Alternative names mapped to their registered name.
    aliases: FxHashMap<String, String>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
            aliases: FxHashMap::default(),
        }
    }

    /// Register a backend type under `name`.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        let name = name.into();
        debug!("Registering backend: {}", name);
        self.factories.insert(
            name,
            Box::new(|config: BackendConfig| -> HalResult<Box<dyn Backend>> {
                Ok(Box::new(B::from_config(config)?))
            }),
        );
    }

    /// Register a backend factory with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!("Registering factory backend: {}", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// Make `alias` resolve to the backend registered as `target`.
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        let (alias, target) = (alias.into(), target.into());
        debug!("Registering alias: {} -> {}", alias, target);
        self.aliases.insert(alias, target);
    }

    fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Create a backend by name with an explicit configuration.
    pub fn create(&self, name: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        match self.factories.get(self.resolve(name)) {
            Some(factory) => factory(config),
            None => Err(HalError::BackendNotFound {
                name: name.to_string(),
                available: self.available_backends(),
            }),
        }
    }

    /// Look up a backend by name using its default configuration.
    pub fn get_backend(&self, name: &str) -> HalResult<Box<dyn Backend>> {
        let target = self.resolve(name);
        self.create(name, BackendConfig::new(target))
    }

    /// List all backend names, aliases included, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .factories
            .keys()
            .chain(self.aliases.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Check if a backend is available by name.
    pub fn has_backend(&self, name: &str) -> bool {
        self.factories.contains_key(self.resolve(name))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.available_backends())
            .finish()
    }
}
