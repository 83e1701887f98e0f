//! Identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::NotificationId;

/// Issues strictly increasing notification identifiers.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

static PROCESS_IDS: IdGenerator = IdGenerator::new();

impl IdGenerator {
    /// Creates a generator whose first id is 1.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Generator shared by every store in the process.
    pub fn process() -> &'static IdGenerator {
        &PROCESS_IDS
    }

    /// Returns a fresh identifier.
    pub fn next(&self) -> NotificationId {
        NotificationId::from_raw(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_strictly_increasing() {
        let ids = IdGenerator::new();
        let a = ids.next();
        let b = ids.next();
        let c = ids.next();

        assert_eq!(a.as_u64(), 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_process_generator_never_repeats() {
        let first = IdGenerator::process().next();
        let second = IdGenerator::process().next();
        assert!(second > first);
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
