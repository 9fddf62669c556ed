// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thread-safe set of currently active input codes.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An input code (key, button, network command...). Its meaning is up to the game.
pub type InputCode = i32;

/// A shared set of active input codes guarded by a single read/write lock.
///
/// Cloning is cheap and every clone refers to the same set, so an input
/// capture or network thread can hold one while the frame loop reads another.
/// Queries take the shared lock; every mutation takes the exclusive lock.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    codes: Arc<RwLock<HashSet<InputCode>>>,
}

impl InputState {
    /// Creates an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `code` as active.
    pub fn set(&self, code: InputCode) {
        self.write().insert(code);
    }

    /// Marks `code` as inactive.
    pub fn unset(&self, code: InputCode) {
        self.write().remove(&code);
    }

    /// Returns `true` if `code` is active.
    pub fn is_set(&self, code: InputCode) -> bool {
        self.read().contains(&code)
    }

    /// Marks every code as inactive.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns the active codes in ascending order.
    pub fn active(&self) -> Vec<InputCode> {
        let mut codes: Vec<_> = self.read().iter().copied().collect();
        codes.sort_unstable();
        codes
    }

    // Lock poisoning is recovered from.
    fn read(&self) -> RwLockReadGuard<'_, HashSet<InputCode>> {
        self.codes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<InputCode>> {
        self.codes.write().unwrap_or_else(PoisonError::into_inner)
    }
}
