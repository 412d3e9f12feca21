use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin pool of upstream API credentials.
///
/// Rotation is blind: no per-key health tracking, no back-off, no removal of
/// bad keys. The cursor is shared across requests; a race between two
/// requests only skews which of the equivalent keys each one draws.
pub struct KeyRotator {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRotator {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Builds a pool from a comma-separated credential list, as configured in
    /// the environment. Blank entries are dropped.
    pub fn from_delimited(raw: &str) -> Self {
        let keys = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect();
        Self::new(keys)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Next credential in rotation, or `None` on an empty pool.
    pub fn next(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(self.keys[index].clone())
    }
}
