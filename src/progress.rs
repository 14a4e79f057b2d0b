use crate::ranker::RankingCriterion;

/// Emitted once per generation at the end of the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaProgressEvent {
    pub current: usize,
    pub total: usize,
    pub rate: f64,
    pub elapsed_seconds: f64,
}

/// Marks run and exemplar-selection phase boundaries. Named after the
/// status events a caller historically streamed over a socket; this crate
/// never constructs a transport itself, it only hands these to whatever
/// [`ProgressSink`] the caller injected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusEvent {
    GaBegin,
    GaEnd,
    GenerateBestBegin(RankingCriterion),
    GenerateBestEnd(RankingCriterion),
    Done,
}

/// Receives per-generation progress and run status events. The GA engine
/// takes one of these by trait object rather than owning a transport
/// client, so production code can wire up a real channel while tests use
/// [`RecordingProgressSink`].
///
/// Emission is fire-and-forget: the core never blocks on or retries a
/// sink call.
pub trait ProgressSink {
    fn progress(&mut self, event: GaProgressEvent);
    fn status(&mut self, event: StatusEvent);
}

/// A sink that discards everything. The default when a caller has no
/// interest in progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn progress(&mut self, _event: GaProgressEvent) {}
    fn status(&mut self, _event: StatusEvent) {}
}

/// Records every event it receives, in order. Used by tests to assert on
/// emission without standing up a transport.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgressSink {
    pub progress_events: Vec<GaProgressEvent>,
    pub status_events: Vec<StatusEvent>,
}

impl ProgressSink for RecordingProgressSink {
    fn progress(&mut self, event: GaProgressEvent) {
        self.progress_events.push(event);
    }

    fn status(&mut self, event: StatusEvent) {
        self.status_events.push(event);
    }
}
