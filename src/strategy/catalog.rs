//! Strategy factory: builds strategies by name and supplies default sets

use crate::agent::{AgentProfile, LifeCycleState, Role};
use crate::core::error::{EngineError, Result};
use crate::strategy::{ScriptedStrategy, Strategy, StrategySpec};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Builds strategies on demand and knows which ones an agent starts with
pub trait StrategyCatalog {
    fn create(&self, name: &str) -> Option<Box<dyn Strategy>>;

    /// Ordered default strategy names for an agent in `state`
    fn default_strategies(&self, profile: &AgentProfile, state: LifeCycleState) -> Vec<String>;
}

pub type SharedCatalog = Arc<dyn StrategyCatalog + Send + Sync>;

type Factory = Box<dyn Fn() -> Box<dyn Strategy> + Send + Sync>;

/// Default strategies for a state, optionally narrowed to a role or class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSet {
    pub state: LifeCycleState,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub class: Option<String>,
    pub strategies: Vec<String>,
}

impl DefaultSet {
    fn applies_to(&self, profile: &AgentProfile, state: LifeCycleState) -> bool {
        self.state == state
            && self.role.map_or(true, |role| role == profile.role)
            && self
                .class
                .as_deref()
                .map_or(true, |class| class.eq_ignore_ascii_case(&profile.class))
    }
}

#[derive(Debug, Default, Deserialize)]
struct StrategyTable {
    #[serde(default, rename = "strategy")]
    strategies: Vec<StrategySpec>,
    #[serde(default)]
    defaults: Vec<DefaultSet>,
}

/// Catalog backed by scripted specs plus any registered native factories
#[derive(Default)]
pub struct TableCatalog {
    specs: AHashMap<String, StrategySpec>,
    factories: AHashMap<String, Factory>,
    defaults: Vec<DefaultSet>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a strategy table; every default must name a known strategy
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: StrategyTable = toml::from_str(content)?;
        let mut catalog = Self::new();
        for spec in table.strategies {
            catalog.insert_spec(spec);
        }
        catalog.defaults = table.defaults;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn insert_spec(&mut self, spec: StrategySpec) {
        self.specs.insert(spec.name.clone(), spec);
    }

    /// Register a native strategy; takes precedence over a spec of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Strategy> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn add_defaults(&mut self, defaults: DefaultSet) {
        self.defaults.push(defaults);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name) || self.specs.contains_key(name)
    }

    pub fn validate(&self) -> Result<()> {
        for set in &self.defaults {
            if let Some(missing) = set.strategies.iter().find(|name| !self.contains(name)) {
                return Err(EngineError::UnknownStrategy(missing.clone()));
            }
        }
        Ok(())
    }
}

impl StrategyCatalog for TableCatalog {
    fn create(&self, name: &str) -> Option<Box<dyn Strategy>> {
        if let Some(factory) = self.factories.get(name) {
            return Some(factory());
        }
        self.specs
            .get(name)
            .map(|spec| Box::new(ScriptedStrategy::new(spec.clone())) as Box<dyn Strategy>)
    }

    fn default_strategies(&self, profile: &AgentProfile, state: LifeCycleState) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for set in self.defaults.iter().filter(|d| d.applies_to(profile, state)) {
            for name in &set.strategies {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}
