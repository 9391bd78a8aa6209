// SPDX-License-Identifier: MPL-2.0
//! Single shared value handed out to consumers as a reader/writer pair.
//!
//! The [`Provider`] owns the slot. Every [`Reader`] sees a completed
//! [`Writer::set`] on its next read; there is no intermediate state to
//! observe because all access happens on the UI thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
struct Slot<T> {
    value: T,
    revision: u64,
}

/// Owner of the shared slot.
pub struct Provider<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T: Clone> Provider<T> {
    /// Creates a provider seeded with `initial`.
    pub fn create(initial: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value: initial,
                revision: 0,
            })),
        }
    }

    /// Hands out a read/write accessor pair bound to this provider's slot.
    #[must_use]
    pub fn accessors(&self) -> (Reader<T>, Writer<T>) {
        (
            Reader {
                slot: Rc::clone(&self.slot),
            },
            Writer {
                slot: Rc::clone(&self.slot),
            },
        )
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Number of writes since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.slot.borrow().revision
    }
}

/// Read side of the accessor pair.
#[derive(Clone)]
pub struct Reader<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T: Clone> Reader<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.slot.borrow().revision
    }
}

/// Write side of the accessor pair.
#[derive(Clone)]
pub struct Writer<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Writer<T> {
    /// Replaces the value. Visible to every reader immediately after return.
    pub fn set(&self, value: T) {
        let mut slot = self.slot.borrow_mut();
        slot.value = value;
        slot.revision += 1;
        log::trace!("shared value updated (revision {})", slot.revision);
    }
}

impl<T: fmt::Debug> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("slot", &*self.slot.borrow())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Reader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("value", &self.slot.borrow().value)
            .finish()
    }
}

impl<T> fmt::Debug for Writer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_seeds_initial_value() {
        let provider = Provider::create("Initial State".to_string());
        let (reader, _writer) = provider.accessors();

        assert_eq!(provider.get(), "Initial State");
        assert_eq!(reader.get(), "Initial State");
        assert_eq!(provider.revision(), 0);
    }

    #[test]
    fn write_is_seen_by_every_reader() {
        let provider = Provider::create(String::from("a"));
        let (first_reader, writer) = provider.accessors();
        let (second_reader, _) = provider.accessors();
        let cloned_reader = first_reader.clone();

        writer.set("b".to_string());

        assert_eq!(first_reader.get(), "b");
        assert_eq!(second_reader.get(), "b");
        assert_eq!(cloned_reader.get(), "b");
        assert_eq!(provider.get(), "b");
    }

    #[test]
    fn every_write_bumps_revision() {
        let provider = Provider::create(0_u32);
        let (reader, writer) = provider.accessors();

        writer.set(1);
        writer.set(1);
        assert_eq!(reader.revision(), 2);
        assert_eq!(reader.get(), 1);
    }

    #[test]
    fn with_borrows_without_cloning() {
        let provider = Provider::create(vec![1, 2, 3]);
        let (reader, _) = provider.accessors();
        assert_eq!(reader.with(Vec::len), 3);
    }

    #[test]
    fn accessors_keep_slot_alive_after_provider_drop() {
        let provider = Provider::create("kept".to_string());
        let (reader, writer) = provider.accessors();
        drop(provider);

        writer.set("still here".to_string());
        assert_eq!(reader.get(), "still here");
    }
}
