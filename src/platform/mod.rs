//! Platform API surface: local storage and background worker registration
//!
//! This module contains the public types and traits the page controller uses
//! to reach browser facilities, with in-memory implementations for headless
//! hosts and tests.

pub mod service_worker;
pub mod storage;

pub use service_worker::{
    InMemoryServiceWorkerManager, NoopServiceWorkerManager, ServiceWorkerManager,
    ServiceWorkerRegistration,
};
pub use storage::{MemoryStorage, Storage};

/// A small composite trait giving the controller typed access to platform
/// primitives.
pub trait PlatformApi: Send + Sync {
    fn service_worker_manager(&self) -> &dyn ServiceWorkerManager;
    fn storage(&self) -> &dyn Storage;
}

/// Platform for headless hosts: in-memory storage and a pluggable worker
/// manager (no worker support by default).
pub struct HeadlessPlatform {
    storage: MemoryStorage,
    workers: Box<dyn ServiceWorkerManager>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            storage: MemoryStorage::new(),
            workers: Box::new(NoopServiceWorkerManager::new()),
        }
    }

    pub fn with_storage(mut self, storage: MemoryStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_service_workers(mut self, workers: impl ServiceWorkerManager + 'static) -> Self {
        self.workers = Box::new(workers);
        self
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformApi for HeadlessPlatform {
    fn service_worker_manager(&self) -> &dyn ServiceWorkerManager {
        self.workers.as_ref()
    }

    fn storage(&self) -> &dyn Storage {
        &self.storage
    }
}
