use serde::{Deserialize, Serialize};

/// Solver step, reported to an [`Observer`]. Vertices are dense graph indices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    KStarted {
        k: u32,
    },
    VertexLabeled {
        vertex: usize,
        label: u32,
    },
    LabelRejected {
        vertex: usize,
        label: u32,
    },
    Backtrack {
        vertex: usize,
    },
    BackjumpTriggered {
        from: usize,
        to: usize,
        count: usize,
    },
    RepairStep {
        round: usize,
        vertex: usize,
        label: u32,
        conflicts: usize,
    },
    AttemptFailed {
        k: u32,
        attempt: usize,
        stuck: Option<usize>,
    },
    KExhausted {
        k: u32,
    },
    SolutionFound {
        k: u32,
    },
}

/// Passive sink for [`StepEvent`]s. Observers see the search but never steer it.
pub trait Observer {
    fn on_event(&mut self, event: &StepEvent);
}

/// Observer that drops everything; monomorphises to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

impl Observer for NoOp {
    #[inline(always)]
    fn on_event(&mut self, _event: &StepEvent) {}
}

impl<F: FnMut(&StepEvent)> Observer for F {
    fn on_event(&mut self, event: &StepEvent) {
        self(event)
    }
}

/// Records every event in order, e.g. for replaying an animation later.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<StepEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&StepEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Observer for EventLog {
    fn on_event(&mut self, event: &StepEvent) {
        self.events.push(event.clone());
    }
}
