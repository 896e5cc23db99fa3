use crate::HashSet;

/// Weights below `FAST_LIMIT_FACTOR * |V|` live in a flat array.
pub const FAST_LIMIT_FACTOR: usize = 4;

/// Position in a tracker's trail, see [`WeightTracker::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// Set of committed edge weights.
///
/// Small weights are answered from a bitmap sized by the vertex count, so the
/// memory does not grow with `k`; anything at or above the limit falls back to
/// a hash set. Every successful mark is also pushed on a trail, which is what
/// `rollback` unwinds.
#[derive(Debug, Clone)]
pub struct WeightTracker {
    fast: Vec<bool>,
    overflow: HashSet<u32>,
    trail: Vec<u32>,
    len: usize,
}

impl WeightTracker {
    pub fn new(num_vertices: usize) -> Self {
        Self::with_fast_limit(FAST_LIMIT_FACTOR * num_vertices)
    }

    pub fn with_fast_limit(fast_limit: usize) -> Self {
        Self {
            fast: vec![false; fast_limit],
            overflow: HashSet::default(),
            trail: Vec::new(),
            len: 0,
        }
    }

    pub fn fast_limit(&self) -> usize {
        self.fast.len()
    }

    /// Number of marked weights.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_used(&self, weight: u32) -> bool {
        match self.fast.get(weight as usize) {
            Some(&used) => used,
            None => self.overflow.contains(&weight),
        }
    }

    /// Returns `false` and leaves the tracker untouched if `weight` was
    /// already marked.
    #[inline]
    pub fn mark_used(&mut self, weight: u32) -> bool {
        let inserted = match self.fast.get_mut(weight as usize) {
            Some(slot) => !std::mem::replace(slot, true),
            None => self.overflow.insert(weight),
        };
        if inserted {
            self.len += 1;
            self.trail.push(weight);
        }
        inserted
    }

    /// Returns `false` if `weight` was not marked. Callers roll back only what
    /// they marked, so `false` here means the caller's bookkeeping is broken.
    #[inline]
    pub fn unmark(&mut self, weight: u32) -> bool {
        let removed = match self.fast.get_mut(weight as usize) {
            Some(slot) => std::mem::replace(slot, false),
            None => self.overflow.remove(&weight),
        };
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Unmarks every weight marked after `checkpoint` that is still marked.
    /// Returns how many weights were released.
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> usize {
        let mut released = 0;
        while self.trail.len() > checkpoint.0 {
            if let Some(weight) = self.trail.pop() {
                if self.unmark(weight) {
                    released += 1;
                }
            }
        }
        released
    }
}
