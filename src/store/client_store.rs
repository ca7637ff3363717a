// src/store/client_store.rs

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::client::Client;

// The authoritative client collection, held in memory for the lifetime of
// the process (no durability across restarts). Order is touch-recency:
// whoever was created or upserted last sits at index 0.
//
// Every operation takes the mutex for its whole read-modify-write, so the
// find-then-mutate patterns in the reconciler and the update/delete routes
// cannot interleave under the multi-threaded runtime.
#[derive(Clone, Default)]
pub struct ClientStore {
    clients: Arc<Mutex<Vec<Client>>>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeds the store with an initial collection (index 0 = most recent).
    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: Arc::new(Mutex::new(clients)),
        }
    }

    // Prepend. Uniqueness is the reconciler's concern, not the store's.
    pub fn insert_front(&self, client: Client) {
        self.clients.lock().insert(0, client);
    }

    // First match in current order.
    pub fn find<P>(&self, pred: P) -> Option<Client>
    where
        P: FnMut(&Client) -> bool,
    {
        let mut pred = pred;
        self.clients.lock().iter().find(|&c| pred(c)).cloned()
    }

    // Idempotent: absent id is a no-op, reported as None.
    pub fn remove_by_id(&self, id: &str) -> Option<Client> {
        let mut clients = self.clients.lock();
        let index = clients.iter().position(|c| c.id == id)?;
        Some(clients.remove(index))
    }

    // Applies `patch` to the matching record in place and returns the
    // merged copy. None when the id is unknown.
    pub fn update_by_id<F>(&self, id: &str, patch: F) -> Option<Client>
    where
        F: FnOnce(&mut Client),
    {
        let mut clients = self.clients.lock();
        let client = clients.iter_mut().find(|c| c.id == id)?;
        patch(client);
        Some(client.clone())
    }

    // Snapshot of the full ordered sequence.
    pub fn list(&self) -> Vec<Client> {
        self.clients.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.clients.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.lock().is_empty()
    }

    // Runs `f` with the collection locked. This is what the reconciler
    // uses: its match-then-merge sequence must be a single critical
    // section or concurrent webhook calls could both take the create path
    // for the same phone number.
    pub fn transact<R>(&self, f: impl FnOnce(&mut Vec<Client>) -> R) -> R {
        let mut clients = self.clients.lock();
        f(&mut clients)
    }
}
