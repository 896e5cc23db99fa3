use super::weight_tracker::{Checkpoint, WeightTracker};
use eis_challenges::edge_irregularity::{Graph, Vertex};

/// One committed label and the tracker position taken just before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub vertex: usize,
    pub label: u32,
    mark: Checkpoint,
}

/// Partial labeling whose used weights can only be released by undoing the
/// assignment that marked them.
///
/// Each `assign` pushes a frame holding a tracker checkpoint and `undo` rolls
/// the tracker back to it, so rollback cannot drift from what was committed.
#[derive(Debug, Clone)]
pub struct LabelingState {
    labels: Vec<u32>,
    tracker: WeightTracker,
    frames: Vec<Assignment>,
}

impl LabelingState {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            labels: vec![0; num_vertices],
            tracker: WeightTracker::new(num_vertices),
            frames: Vec::with_capacity(num_vertices),
        }
    }

    pub fn label(&self, vertex: usize) -> Option<u32> {
        match self.labels[vertex] {
            0 => None,
            l => Some(l),
        }
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn tracker(&self) -> &WeightTracker {
        &self.tracker
    }

    /// Number of committed assignments.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_complete(&self) -> bool {
        self.frames.len() == self.labels.len()
    }

    /// Fills `weights` with the weights `label` would form at `vertex` against
    /// its labeled neighbors. Returns `false` as soon as one of them is already
    /// used or repeats another new weight; nothing is mutated either way.
    pub fn candidate_weights<V: Vertex>(
        &self,
        graph: &Graph<V>,
        vertex: usize,
        label: u32,
        weights: &mut Vec<u32>,
    ) -> bool {
        weights.clear();
        for &neighbor in graph.neighbors(vertex) {
            let other = self.labels[neighbor];
            if other == 0 {
                continue;
            }
            let weight = label + other;
            if self.tracker.is_used(weight) || weights.contains(&weight) {
                return false;
            }
            weights.push(weight);
        }
        true
    }

    /// Commits `label` at `vertex`. `weights` must come from a successful
    /// `candidate_weights` call against the current state.
    pub fn assign(&mut self, vertex: usize, label: u32, weights: &[u32]) {
        debug_assert_eq!(self.labels[vertex], 0, "vertex {} is already labeled", vertex);
        let mark = self.tracker.checkpoint();
        for &weight in weights {
            let marked = self.tracker.mark_used(weight);
            debug_assert!(marked, "weight {} was already in use", weight);
        }
        self.labels[vertex] = label;
        self.frames.push(Assignment {
            vertex,
            label,
            mark,
        });
    }

    /// Pops the newest assignment and releases exactly the weights it marked.
    pub fn undo(&mut self) -> Option<Assignment> {
        let frame = self.frames.pop()?;
        self.tracker.rollback(frame.mark);
        self.labels[frame.vertex] = 0;
        Some(frame)
    }

    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }
}
