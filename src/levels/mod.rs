//! Authored level content
//!
//! Levels are immutable templates shared behind `Arc`; the simulation copies
//! their geometry into live arrays on every reset.

pub mod fatal_exception;
pub mod firewall_breach;
pub mod kernel_panic;
pub mod mem_leak;
pub mod system_init;

use std::sync::Arc;

use crate::error::EngineError;
use crate::sim::Level;

/// Ordered set of playable levels
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Arc<Level>>,
}

impl LevelCatalog {
    /// Build a catalog from levels in play order
    pub fn new(levels: Vec<Level>) -> Self {
        Self {
            levels: levels.into_iter().map(Arc::new).collect(),
        }
    }

    /// The five shipped levels
    pub fn builtin() -> Self {
        Self::new(vec![
            system_init::level(),
            firewall_breach::level(),
            fatal_exception::level(),
            mem_leak::level(),
            kernel_panic::level(),
        ])
    }

    pub fn get(&self, id: u32) -> Result<Arc<Level>, EngineError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(EngineError::UnknownLevel(id))
    }

    /// Look up a level, falling back to the first one on an unknown id.
    /// Returns `None` only for an empty catalog.
    pub fn get_or_default(&self, id: u32) -> Option<Arc<Level>> {
        match self.get(id) {
            Ok(level) => Some(level),
            Err(e) => {
                log::error!("{e}, loading the first level instead");
                self.levels.first().cloned()
            }
        }
    }

    /// Whether `id` is the final level in play order
    pub fn is_last(&self, id: u32) -> bool {
        self.levels.last().is_some_and(|l| l.id == id)
    }

    /// Level that follows `id` in play order
    pub fn next_after(&self, id: u32) -> Option<u32> {
        let idx = self.levels.iter().position(|l| l.id == id)?;
        self.levels.get(idx + 1).map(|l| l.id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(|l| l.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Level>> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
