//=========================================================================
// Request Queue
//=========================================================================
//
// Queue for screen changes requested from inside screen hooks.
//
// Hooks run while the manager is mid-dispatch, so they cannot call back
// into it. They queue requests here instead; the screen manager applies
// the queue at the tick boundary, after all update dispatch is done.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ScreenKey;

//=== ScreenRequest =======================================================

/// A deferred screen manager operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest<K: ScreenKey> {
    /// Make the keyed screen current.
    Change(K),

    /// Unload and dispose the keyed screen.
    Remove(K),
}

//=== RequestQueue ========================================================

/// FIFO queue of [`ScreenRequest`]s.
#[derive(Debug)]
pub struct RequestQueue<K: ScreenKey> {
    queue: Vec<ScreenRequest<K>>,
}

impl<K: ScreenKey> RequestQueue<K> {
    /// Creates a new empty request queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a request to be applied at the next tick boundary.
    pub fn push(&mut self, request: ScreenRequest<K>) {
        self.queue.push(request);
    }

    /// Shorthand for `push(ScreenRequest::Change(key))`.
    pub fn change_to(&mut self, key: K) {
        self.push(ScreenRequest::Change(key));
    }

    /// Shorthand for `push(ScreenRequest::Remove(key))`.
    pub fn remove(&mut self, key: K) {
        self.push(ScreenRequest::Remove(key));
    }

    /// Returns an iterator over the queued requests.
    pub fn iter(&self) -> impl Iterator<Item = &ScreenRequest<K>> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all requests from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<ScreenRequest<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: ScreenKey> Default for RequestQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
