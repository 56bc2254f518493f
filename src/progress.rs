/// A progress update from a long-running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// What is being processed, e.g. `"texture"` or `"merge"`.
    pub stage: &'static str,
    /// Units of work finished so far.
    pub done: usize,
    /// Units of work in this stage.
    pub total: usize,
}

impl ProgressEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(stage: &'static str, done: usize, total: usize) -> Self {
        Self { stage, done, total }
    }

    /// Completed fraction in `[0, 1]`. A stage with no work is complete.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.done as f64 / self.total as f64;
        fraction.clamp(0.0, 1.0)
    }
}

/// Observer for progress updates. Has no effect on results.
pub trait Progress {
    /// Receives one update.
    fn report(&mut self, event: &ProgressEvent);
}

impl<F> Progress for F
where
    F: FnMut(&ProgressEvent),
{
    fn report(&mut self, event: &ProgressEvent) {
        self(event);
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _event: &ProgressEvent) {}
}
