//! Shared value store holding the single current text.

use super::types::{text_len, WriteMode};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

/// The process-wide current text.
///
/// Readers never wait longer than the critical section of a concurrent write.
#[derive(Debug, Default)]
pub struct TextStore {
    text: RwLock<String>,
}

impl TextStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored value. Returns the length of the new value.
    pub fn set(&self, text: &str) -> usize {
        self.apply(WriteMode::Set, text, |_| ()).0
    }

    /// Concatenates `text` onto the stored value.
    ///
    /// Returns the length of the appended chunk, not the total.
    pub fn append(&self, text: &str) -> usize {
        self.apply(WriteMode::Append, text, |_| ()).0
    }

    /// Applies a write and hands the resulting full value to `then` before
    /// the lock is released, so no other write can slip in between.
    ///
    /// Returns the chunk length and whatever `then` returned.
    pub fn apply<R>(
        &self,
        mode: WriteMode,
        text: &str,
        then: impl FnOnce(&str) -> R,
    ) -> (usize, R) {
        let mut current = self.write_lock();
        match mode {
            WriteMode::Set => text.clone_into(&mut *current),
            WriteMode::Append => current.push_str(text),
        }
        let out = then(&current);
        (text_len(text), out)
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> String {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total length of the current value.
    pub fn len(&self) -> usize {
        text_len(&self.text.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Resets the value to the empty string.
    pub fn clear(&self) {
        self.write_lock().clear();
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, String> {
        // A panicking writer cannot leave the String half-mutated.
        self.text.write().unwrap_or_else(PoisonError::into_inner)
    }
}
