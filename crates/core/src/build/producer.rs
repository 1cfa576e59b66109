use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only sink for build items.
///
/// Several build stages may share one producer, so appends go through a mutex.
#[derive(Debug)]
pub struct BuildProducer<T> {
    items: Mutex<Vec<T>>,
}

impl<T> BuildProducer<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Append one item
    pub fn produce(&self, item: T) {
        self.lock().push(item);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the items produced so far, in production order
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().clone()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for BuildProducer<T> {
    fn default() -> Self {
        Self::new()
    }
}
