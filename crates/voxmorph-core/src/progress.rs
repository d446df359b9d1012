//! Status and progress reporting
//!
//! Long-running algorithms report coarse progress to a [`ProgressSink`].
//! Reporting is advisory: sinks return nothing and algorithms never branch on
//! them.

/// Receiver of status messages and progress counts
pub trait ProgressSink {
    /// A phase of the algorithm started
    fn on_status(&self, _message: &str) {}

    /// `current` of `total` units of the current phase are done
    fn on_progress(&self, _current: usize, _total: usize) {}
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Sink that forwards to `tracing` events
///
/// Status messages are emitted at `DEBUG`, progress counts at `TRACE`, both
/// under the `voxmorph` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_status(&self, message: &str) {
        tracing::debug!(target: "voxmorph", "{message}");
    }

    fn on_progress(&self, current: usize, total: usize) {
        tracing::trace!(target: "voxmorph", current, total, "progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        messages: RefCell<Vec<String>>,
    }

    impl ProgressSink for Recorder {
        fn on_status(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let sink = NoProgress;
        sink.on_status("ignored");
        sink.on_progress(1, 2);
        TracingProgress.on_status("forwarded");
    }

    #[test]
    fn test_custom_sink_receives_status() {
        let rec = Recorder::default();
        let sink: &dyn ProgressSink = &rec;
        sink.on_status("forward scan");
        sink.on_progress(3, 4);
        assert_eq!(rec.messages.borrow().as_slice(), &["forward scan".to_string()]);
    }
}
