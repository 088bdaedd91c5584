//! Persistence seam for the client session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard and the auth helpers depend on `SessionRepository`, never on
//! browser storage directly. The browser build persists the four session
//! fields in `localStorage`; tests and SSR use the in-memory repository.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::session::{Session, parse_session};
use crate::util::persistence;

/// `localStorage` key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "storefront.session";

/// Load/save/clear access to the persisted session.
///
/// `clear` must be idempotent: clearing an absent session is a no-op.
pub trait SessionRepository: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Repository handle shared through Leptos context.
pub type SharedRepository = Arc<dyn SessionRepository>;

/// Browser `localStorage` repository.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageRepository;

impl SessionRepository for LocalStorageRepository {
    fn load(&self) -> Option<Session> {
        let raw = persistence::load_raw(SESSION_STORAGE_KEY)?;
        match parse_session(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                leptos::logging::warn!("discarding unreadable stored session: {e}");
                persistence::remove(SESSION_STORAGE_KEY);
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        persistence::save_json(SESSION_STORAGE_KEY, session);
    }

    fn clear(&self) {
        persistence::remove(SESSION_STORAGE_KEY);
    }
}

/// Process-local repository used for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    slot: Mutex<Option<Session>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }
}

impl SessionRepository for MemoryRepository {
    fn load(&self) -> Option<Session> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save(&self, session: &Session) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(*session);
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Repository for the current build target.
#[must_use]
pub fn default_repository() -> SharedRepository {
    if cfg!(feature = "hydrate") {
        Arc::new(LocalStorageRepository)
    } else {
        Arc::new(MemoryRepository::new())
    }
}
