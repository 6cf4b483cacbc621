//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring an AppState to an in-memory store the test can inspect
//! - A notification counter for checking that mutations broadcast
//! - Helpers for building expected-command lists

#![allow(dead_code)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use linux_quest_lib::db::{MemoryStore, StorageGateway};
use linux_quest_lib::AppState;
use quest_core::DEFAULT_MISTAKE_LIMIT;

/// Test context containing the app state and a handle on its storage.
pub struct TestContext {
    pub state: AppState,
    pub store: MemoryStore,
    notifications: Arc<AtomicUsize>,
}

impl TestContext {
    /// Create a context with unlimited in-memory storage.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create a context over a prepared store, e.g. one with a quota or
    /// pre-seeded data.
    pub fn with_store(store: MemoryStore) -> Self {
        let state = AppState::new(StorageGateway::new(store.clone()), DEFAULT_MISTAKE_LIMIT);
        let notifications = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notifications);
        state.notifier.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Self {
            state,
            store,
            notifications,
        }
    }

    /// Number of data-changed notifications seen so far.
    pub fn notifications(&self) -> usize {
        self.notifications.load(Ordering::SeqCst)
    }
}

/// Owned expected-command list from string literals.
pub fn expected(cmds: &[&str]) -> Vec<String> {
    cmds.iter().map(|s| s.to_string()).collect()
}
