//! In-process client store.
//!
//! Used by tests and local demos. Records live in insertion order behind an
//! async lock; every operation holds the lock for its whole read-modify-write,
//! so increments never interleave.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use loyalty_core::{Client, ClientId, ClientUpdate, NewClient};

use super::{ClientStore, RepositoryError};

/// Client store held in memory.
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: RwLock<Vec<Client>>,
    offline: AtomicBool,
}

impl MemoryClientStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a lost backend connection: while offline every operation
    /// fails the way a timed-out pool would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        self.check_online()?;
        Ok(self.clients.read().await.clone())
    }

    async fn create(&self, input: &NewClient) -> Result<Client, RepositoryError> {
        self.check_online()?;
        let client = input.clone().into_client(ClientId::generate());
        self.clients.write().await.push(client.clone());
        Ok(client)
    }

    async fn get(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        self.check_online()?;
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| c.id == id).cloned())
    }

    async fn update(
        &self,
        id: ClientId,
        update: &ClientUpdate,
    ) -> Result<Option<Client>, RepositoryError> {
        self.check_online()?;
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        *client = client.apply(update);
        Ok(Some(client.clone()))
    }

    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError> {
        self.check_online()?;
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|c| c.id != id);
        Ok(clients.len() < before)
    }

    async fn increment_points(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        self.check_online()?;
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        client.loyalty_points = client
            .loyalty_points
            .incremented()
            .ok_or(RepositoryError::PointsOverflow(id))?;
        Ok(Some(client.clone()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_online()
    }
}
