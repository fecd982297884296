// ABOUTME: Coalesces concurrent identical cache misses into one underlying fetch
// ABOUTME: Waiters on the same key receive a clone of the shared outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::key_pattern;
use crate::errors::RecipeResult;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Per-key registry of in-flight fetches
///
/// If the caller driving a fetch is dropped, one of the remaining waiters
/// takes over and runs its own fetch.
pub struct SingleFlight<T> {
    in_flight: DashMap<String, Arc<OnceCell<T>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            in_flight: DashMap::new(),
        }
    }
}

impl<T: Clone> SingleFlight<T> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` for `key` unless an identical fetch is already running,
    /// in which case wait for and share its outcome
    pub async fn run<F, Fut>(&self, key: &str, fetch: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let cell = match self.in_flight.entry(key.to_owned()) {
            // Completed cell left behind by a cancelled caller
            Entry::Occupied(mut occupied) if occupied.get().initialized() => {
                let cell = Arc::new(OnceCell::new());
                occupied.insert(Arc::clone(&cell));
                cell
            }
            Entry::Occupied(occupied) => Arc::clone(occupied.get()),
            Entry::Vacant(vacant) => Arc::clone(vacant.insert(Arc::new(OnceCell::new())).value()),
        };

        let outcome = cell.get_or_init(fetch).await.clone();
        self.in_flight
            .remove_if(key, |_, current| Arc::ptr_eq(current, &cell));
        outcome
    }

    /// Detach in-flight fetches whose key matches a glob pattern
    ///
    /// Callers already waiting still receive the detached outcome; later
    /// callers for those keys start a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidQuery` if the pattern is not a valid glob
    pub fn forget_matching(&self, pattern: &str) -> RecipeResult<usize> {
        let pattern = key_pattern(pattern)?;
        let mut detached = 0;
        self.in_flight.retain(|key, _| {
            let matched = pattern.matches(key);
            if matched {
                detached += 1;
            }
            !matched
        });
        Ok(detached)
    }

    /// Number of keys with a fetch in progress
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
