//! Bounded in-memory session store.
//!
//! Edit snapshots are additive — nothing ever deletes them during a session —
//! so the store enforces a per-session cap and evicts oldest-first once the
//! cap is exceeded.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use rand::distr::{Alphanumeric, SampleString};
use tracing::debug;

use crate::SessionStore;

/// Session-scoped key/value store with oldest-first eviction.
pub struct MemorySessionStore {
    inner: Mutex<SessionInner>,
    cap: usize,
}

struct SessionInner {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    secret: String,
}

impl MemorySessionStore {
    /// Default per-session entry cap.
    pub const DEFAULT_CAP: usize = 32;

    pub fn new() -> Self {
        Self::with_cap(Self::DEFAULT_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                secret: random_secret(),
            }),
            cap,
        }
    }

    /// Replace the session secret, as happens when the user re-authenticates.
    /// Existing snapshot keys stop verifying afterwards.
    pub fn rotate_secret(&self) {
        let mut inner = self.inner.lock();
        inner.secret = random_secret();
        debug!("session secret rotated");
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        let mut inner = self.inner.lock();
        if inner.entries.insert(key.to_string(), value).is_none() {
            inner.order.push_back(key.to_string());
        }
        while inner.order.len() > self.cap {
            if let Some(evicted) = inner.order.pop_front() {
                inner.entries.remove(&evicted);
                debug!(key = %evicted, "session store cap reached, evicting oldest entry");
            }
        }
    }

    fn secret(&self) -> String {
        self.inner.lock().secret.clone()
    }
}

fn random_secret() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 32)
}
