//! Process-local repositories used when no database URL is configured.
//!
//! State lives behind a `std::sync::Mutex` and is lost on restart. Both
//! adapters honour the same contracts as their Diesel counterparts, including
//! owner scoping and the trip revision check.

mod trip_repository;
mod user_repository;

pub use trip_repository::InMemoryTripRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the data when a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
