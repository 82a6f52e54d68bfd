//! Admission control for concurrent resolutions.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error_handling::ResolveError;

/// Counting gate bounding the number of in-flight resolutions.
///
/// Waiting for a slot suspends the task; the slot is returned when the
/// [`AdmissionPermit`] is dropped, whichever way the resolution ends.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// An occupied admission slot. Dropping it frees the slot.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionController {
    /// Creates a gate with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits for a free slot.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::AdmissionClosed` if the gate was closed.
    pub async fn admit(&self) -> Result<AdmissionPermit, ResolveError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ResolveError::AdmissionClosed)?;
        Ok(AdmissionPermit { _permit: permit })
    }

    /// Stops admitting; waiting and future callers get `AdmissionClosed`.
    pub fn close(&self) {
        self.semaphore.close();
    }

    /// Configured number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
