use std::sync::Mutex;

/// Registration metadata for a background (offline-support) worker
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceWorkerRegistration {
    pub scope: String,
    pub script_url: String,
    pub id: String,
}

/// Manager trait for background worker registration
pub trait ServiceWorkerManager: Send + Sync {
    /// Register a worker script for a given scope
    fn register(&self, scope: &str, script_url: &str) -> Result<ServiceWorkerRegistration, String>;

    /// Unregister the worker for a scope
    fn unregister(&self, scope: &str) -> Result<(), String>;

    /// List current registrations
    fn list_registrations(&self) -> Vec<ServiceWorkerRegistration>;
}

/// A manager for hosts without worker support; every registration fails
pub struct NoopServiceWorkerManager;

impl NoopServiceWorkerManager {
    pub fn new() -> Self {
        NoopServiceWorkerManager
    }
}

impl Default for NoopServiceWorkerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceWorkerManager for NoopServiceWorkerManager {
    fn register(&self, _scope: &str, _script_url: &str) -> Result<ServiceWorkerRegistration, String> {
        Err("service workers not supported".to_string())
    }

    fn unregister(&self, _scope: &str) -> Result<(), String> {
        Ok(())
    }

    fn list_registrations(&self) -> Vec<ServiceWorkerRegistration> {
        Vec::new()
    }
}

/// Accepts registrations and keeps them in memory, one per scope
#[derive(Default)]
pub struct InMemoryServiceWorkerManager {
    registrations: Mutex<Vec<ServiceWorkerRegistration>>,
}

impl InMemoryServiceWorkerManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServiceWorkerManager for InMemoryServiceWorkerManager {
    fn register(&self, scope: &str, script_url: &str) -> Result<ServiceWorkerRegistration, String> {
        if !script_url.starts_with('/') {
            return Err(format!("script url must be same-origin: {}", script_url));
        }
        let mut regs = self.registrations.lock().map_err(|e| e.to_string())?;
        regs.retain(|r| r.scope != scope);
        let reg = ServiceWorkerRegistration {
            scope: scope.to_string(),
            script_url: script_url.to_string(),
            id: format!("sw-{}", regs.len() + 1),
        };
        regs.push(reg.clone());
        Ok(reg)
    }

    fn unregister(&self, scope: &str) -> Result<(), String> {
        let mut regs = self.registrations.lock().map_err(|e| e.to_string())?;
        regs.retain(|r| r.scope != scope);
        Ok(())
    }

    fn list_registrations(&self) -> Vec<ServiceWorkerRegistration> {
        self.registrations
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}
