use std::collections::HashSet;
use std::sync::Mutex;

/// Records metadata lookups that found nothing, logging each distinct field once.
#[derive(Debug, Default)]
pub struct MissingFieldLog {
    seen: Mutex<HashSet<String>>,
}

impl MissingFieldLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes a missing field. Returns true the first time `field` is seen.
    pub fn note(&self, field: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        if seen.contains(field) {
            return false;
        }
        log::warn!(target: "meta", "missing metadata field `{}`", field);
        seen.insert(field.to_string());
        true
    }

    pub fn count(&self) -> usize {
        self.seen.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
