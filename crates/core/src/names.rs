//! Name generation for sprites constructed without an explicit name
//!
//! The default generator is process-wide and sequential, so generated names
//! are unique for the lifetime of the process. Code that needs reproducible
//! names (tests, recorded sessions) can pass its own [`NameGenerator`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique sprite names
pub trait NameGenerator {
    fn next_name(&mut self) -> String;
}

/// Sequential generator producing `<prefix>-<n>` starting at 0
#[derive(Debug, Clone)]
pub struct SequentialNames {
    prefix: String,
    next: u64,
}

impl SequentialNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl Default for SequentialNames {
    fn default() -> Self {
        Self::new("sprite")
    }
}

impl NameGenerator for SequentialNames {
    fn next_name(&mut self) -> String {
        let name = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

impl<F: FnMut() -> String> NameGenerator for F {
    fn next_name(&mut self) -> String {
        self()
    }
}

static GLOBAL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Next name from the process-wide generator (`sprite-<n>`)
pub fn default_name() -> String {
    let n = GLOBAL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("sprite-{n}")
}
