//! Drop accounting and scripted construction failures.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

/// Counts how many [`Tracked`] values were created and dropped.
#[derive(Clone, Default)]
pub struct DropCounter {
    counts: Rc<Counts>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new tracked value, numbered in creation order.
    pub fn track(&self) -> Tracked {
        let id = self.counts.created.get();
        self.counts.created.set(id + 1);
        Tracked {
            id,
            counts: Rc::clone(&self.counts),
        }
    }

    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }

    /// Created and not yet dropped.
    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }
}

/// A value whose drop is reported to its [`DropCounter`].
pub struct Tracked {
    id: usize,
    counts: Rc<Counts>,
}

impl Tracked {
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let id = self.counts.created.get();
        self.counts.created.set(id + 1);
        Self {
            id,
            counts: Rc::clone(&self.counts),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counts.dropped.set(self.counts.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}

/// Error produced by [`FailAt::attempt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Failed {
    pub attempt: usize,
}

impl fmt::Display for Failed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "construction attempt {} failed", self.attempt)
    }
}

impl std::error::Error for Failed {}

/// Lets the first `succeed` attempts through and fails every one after.
#[derive(Debug)]
pub struct FailAt {
    succeed: usize,
    attempts: Cell<usize>,
}

impl FailAt {
    pub fn new(succeed: usize) -> Self {
        Self {
            succeed,
            attempts: Cell::new(0),
        }
    }

    pub fn attempt(&self) -> Result<(), Failed> {
        let attempt = self.attempts.get();
        self.attempts.set(attempt + 1);
        if attempt < self.succeed {
            Ok(())
        } else {
            Err(Failed { attempt })
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_clones_and_drops() {
        let counter = DropCounter::new();
        let a = counter.track();
        let b = a.clone();
        assert_eq!(counter.live(), 2);
        assert_ne!(a, b);
        drop(a);
        drop(b);
        assert_eq!(counter.dropped(), 2);
    }

    #[test]
    fn fail_at_fails_after_budget() {
        let gate = FailAt::new(2);
        assert!(gate.attempt().is_ok());
        assert!(gate.attempt().is_ok());
        assert_eq!(gate.attempt(), Err(Failed { attempt: 2 }));
        assert_eq!(gate.attempts(), 3);
    }
}
