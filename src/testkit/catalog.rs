//! In-memory [`DatabaseCatalog`] for provisioning tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::database::ConnectionTarget;
use crate::error::{Error, Result};
use crate::port::outbound::catalog::{CatalogConnector, DatabaseCatalog};

#[derive(Default)]
struct State {
    /// Database name to comment.
    databases: BTreeMap<String, Option<String>>,
    create_calls: u32,
}

/// A fake server catalog. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    state: Arc<Mutex<State>>,
    racing: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_databases(names: &[&str]) -> Self {
        let catalog = Self::new();
        {
            let mut state = catalog.state.lock().unwrap();
            for name in names {
                state.databases.insert((*name).to_string(), None);
            }
        }
        catalog
    }

    /// Simulate another session creating each database just before us.
    pub fn racing(mut self) -> Self {
        self.racing = true;
        self
    }

    pub fn comment(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .databases
            .get(name)
            .cloned()
            .flatten()
    }

    pub fn database_names(&self) -> Vec<String> {
        self.state.lock().unwrap().databases.keys().cloned().collect()
    }

    pub fn create_calls(&self) -> u32 {
        self.state.lock().unwrap().create_calls
    }
}

#[async_trait]
impl DatabaseCatalog for MemoryCatalog {
    async fn database_exists(&self, name: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().databases.contains_key(name))
    }

    async fn create_database(&self, name: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        let existed = state.databases.insert(name.to_string(), None).is_some();
        Ok(!existed && !self.racing)
    }

    async fn comment_on_database(&self, name: &str, comment: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.databases.get_mut(name) {
            Some(slot) => {
                *slot = Some(comment.to_string());
                Ok(())
            }
            None => Err(Error::Connection(format!("database \"{name}\" does not exist"))),
        }
    }
}

/// Hands out the shared [`MemoryCatalog`], or fails every connect.
pub struct MemoryConnector {
    catalog: Option<MemoryCatalog>,
}

impl MemoryConnector {
    pub fn new(catalog: MemoryCatalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    pub fn unreachable() -> Self {
        Self { catalog: None }
    }

    /// # Panics
    ///
    /// Panics for an unreachable connector.
    pub fn catalog(&self) -> &MemoryCatalog {
        self.catalog.as_ref().expect("unreachable connector has no catalog")
    }
}

#[async_trait]
impl CatalogConnector for MemoryConnector {
    async fn connect(&self, server: &ConnectionTarget) -> Result<Box<dyn DatabaseCatalog>> {
        match &self.catalog {
            Some(catalog) => Ok(Box::new(catalog.clone())),
            None => Err(Error::Connection(format!("connection refused: {server}"))),
        }
    }
}
