//! Minimal read/update handle shared by signals and plain mutex cells.
//!
//! DESIGN
//! ======
//! `SessionStore` and the dashboard loader only need "read a copy" and
//! "mutate in place". Abstracting that lets the same logic drive Leptos
//! signals in the app and `Arc<Mutex<_>>` cells in native tests.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

/// Shared mutable state slot.
pub trait StateCell<T>: Clone + Send + Sync + 'static {
    /// Clone of the current value, without reactive tracking.
    fn snapshot(&self) -> T;

    /// Mutate the value in place, notifying observers where applicable.
    fn modify(&self, f: impl FnOnce(&mut T));
}

impl<T> StateCell<T> for RwSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn snapshot(&self) -> T {
        self.get_untracked()
    }

    fn modify(&self, f: impl FnOnce(&mut T)) {
        self.update(f);
    }
}

impl<T> StateCell<T> for Arc<Mutex<T>>
where
    T: Clone + Send + 'static,
{
    fn snapshot(&self) -> T {
        self.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn modify(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.lock().unwrap_or_else(PoisonError::into_inner));
    }
}
