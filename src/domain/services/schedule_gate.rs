use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-trainer mutual exclusion for schedule writes. The availability check
/// and the subsequent insert/update must run under the same guard, so of two
/// concurrent conflicting requests for one trainer at most one can commit.
/// Bookings of different trainers never contend.
#[derive(Default)]
pub struct ScheduleGate {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ScheduleGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_for(&self, trainer_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("schedule gate poisoned");
        locks
            .entry(trainer_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
