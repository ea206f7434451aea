//! Orientation shared between the sensor producer and the renderers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Attitude sample, all fields in tenths of a degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Orientation {
    pub heading: i32,
    pub pitch: i32,
    pub roll: i32,
}

impl Orientation {
    pub const fn new(heading: i32, pitch: i32, roll: i32) -> Self {
        Self {
            heading,
            pitch,
            roll,
        }
    }
}

/// A consistent read of the shared orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub orientation: Orientation,
    /// Bumped by every publish
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Record {
    orientation: Orientation,
    generation: u64,
}

/// Latest orientation plus a change counter, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct SharedOrientation {
    inner: Arc<Mutex<Record>>,
}

impl SharedOrientation {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Record> {
        // the record is plain data, a poisoned lock still holds a whole sample
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new sample; readers see all three fields change together.
    pub fn publish(&self, orientation: Orientation) {
        let mut record = self.lock();
        record.orientation = orientation;
        record.generation = record.generation.wrapping_add(1);
    }

    pub fn snapshot(&self) -> Snapshot {
        let record = self.lock();
        Snapshot {
            orientation: record.orientation,
            generation: record.generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}
