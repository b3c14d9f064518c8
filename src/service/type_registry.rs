// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of type descriptors.

use crate::domain::{TypeDescriptor, TypeKey, TypeTable};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};

/// Process-lifetime store of [`TypeDescriptor`]s.
///
/// Like the strategy chain it is read-mostly: a conversion loads one snapshot
/// of the table without locking, registration publishes an updated copy.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    table: ArcSwap<TypeTable>,
    writer: Mutex<()>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the descriptors of `table`.
    pub fn from_table(table: TypeTable) -> Self {
        TypeRegistry {
            table: ArcSwap::from_pointee(table),
            writer: Mutex::new(()),
        }
    }

    /// Returns the current table.
    pub fn snapshot(&self) -> Arc<TypeTable> {
        self.table.load_full()
    }

    fn update<R>(&self, f: impl FnOnce(&mut TypeTable) -> R) -> R {
        let _writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut table = TypeTable::clone(&self.table.load());
        let result = f(&mut table);
        self.table.store(Arc::new(table));
        result
    }

    /// Adds or replaces the descriptor of a type.
    ///
    /// Returns `true` if an existing descriptor was replaced.
    pub fn register(&self, descriptor: TypeDescriptor) -> bool {
        let key = descriptor.key();
        let replaced = self.update(|table| table.insert(descriptor).is_some());
        tracing::debug!(
            "Registered type descriptor for {}{}",
            key,
            if replaced { " (replaced)" } else { "" }
        );
        replaced
    }

    /// Removes the descriptor of a type, returning whether one was registered.
    pub fn unregister(&self, key: &TypeKey) -> bool {
        let removed = self.update(|table| table.remove(key).is_some());
        if removed {
            tracing::debug!("Unregistered type descriptor for {}", key);
        }
        removed
    }

    /// Returns the descriptor of a type; nullability is ignored.
    pub fn get(&self, key: &TypeKey) -> Option<TypeDescriptor> {
        self.snapshot().get(key).cloned()
    }

    /// Returns `true` if the type is described.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.snapshot().contains(key)
    }

    /// Number of described types.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` if no type is described.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
