use super::*;
use crate::state::session::{Provider, Role};

fn sample() -> Session {
    Session { role: Role::User, is_verified: true, is_blocked: false, provider: Provider::Local }
}

#[test]
fn memory_repository_starts_empty() {
    assert_eq!(MemoryRepository::new().load(), None);
}

#[test]
fn memory_repository_save_then_load() {
    let repo = MemoryRepository::new();
    repo.save(&sample());
    assert_eq!(repo.load(), Some(sample()));
}

#[test]
fn memory_repository_save_overwrites() {
    let repo = MemoryRepository::with_session(sample());
    let admin = Session { role: Role::Admin, ..sample() };
    repo.save(&admin);
    assert_eq!(repo.load(), Some(admin));
}

#[test]
fn memory_repository_clear_is_idempotent() {
    let repo = MemoryRepository::with_session(sample());
    repo.clear();
    assert_eq!(repo.load(), None);
    repo.clear();
    assert_eq!(repo.load(), None);
}

#[test]
fn local_storage_repository_is_inert_outside_browser() {
    let repo = LocalStorageRepository;
    repo.save(&sample());
    assert_eq!(repo.load(), None);
    repo.clear();
}

#[test]
fn shared_repository_is_usable_as_trait_object() {
    let repo: SharedRepository = Arc::new(MemoryRepository::new());
    repo.save(&sample());
    assert!(repo.load().is_some());
}
