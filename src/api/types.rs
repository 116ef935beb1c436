//! Shared types for the stub backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::store::Store;
use crate::models::UserType;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the stub router
// ═══════════════════════════════════════════════════════════

/// Most recent requests kept in the access log; older entries are dropped.
pub const ACCESS_LOG_CAPACITY: usize = 1024;

/// Shared context for all routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    store: Arc<RwLock<Store>>,
    access_log: Arc<Mutex<VecDeque<AccessEntry>>>,
}

impl ApiContext {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            access_log: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Context over `Store::seeded()`.
    pub fn seeded() -> Self {
        Self::new(Store::seeded())
    }

    pub fn read_store(&self) -> Result<RwLockReadGuard<'_, Store>, ApiError> {
        self.store
            .read()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }

    pub fn write_store(&self) -> Result<RwLockWriteGuard<'_, Store>, ApiError> {
        self.store
            .write()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }

    pub fn record_access(&self, entry: AccessEntry) {
        if let Ok(mut log) = self.access_log.lock() {
            if log.len() == ACCESS_LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(entry);
        }
    }

    /// Snapshot of the retained requests, oldest first.
    pub fn access_log(&self) -> Vec<AccessEntry> {
        self.access_log
            .lock()
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }
}

// ═══════════════════════════════════════════════════════════
// Request context: injected by middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated caller, injected into request extensions by the auth
/// middleware after token validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub kind: UserType,
    pub id: Uuid,
}

/// One request as seen by the audit middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub method: String,
    pub path: String,
    /// `Authorization: Bearer ...` was present (validity not checked).
    pub bearer: bool,
    pub json_content_type: bool,
    pub status: u16,
}

// ═══════════════════════════════════════════════════════════
// Secrets
// ═══════════════════════════════════════════════════════════

/// SHA-256 of a bearer token or password.
pub fn hash_secret(secret: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
