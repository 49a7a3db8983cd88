use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Events emitted while a pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The input was not a list; the run short-circuits to an empty collection.
    InputRejected,
    RunStarted { input_len: usize, stage_count: usize },
    /// A non-invocable slot was skipped (treated as identity).
    StageSkipped { index: usize },
    StageFinished {
        index: usize,
        name: String,
        input_len: usize,
        output_len: usize,
    },
    RunFinished {
        output_len: usize,
        stages_applied: usize,
        stages_skipped: usize,
        elapsed: Duration,
    },
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// A simple stderr logger for pipeline events.
#[derive(Debug, Default)]
pub struct StdErrPipelineObserver;

impl PipelineObserver for StdErrPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        eprintln!("[pipeline] {event}");
    }
}

/// An observer that fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_event(&self, event: &PipelineEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputRejected => f.write_str("input rejected: not a list"),
            Self::RunStarted {
                input_len,
                stage_count,
            } => write!(f, "run started input_len={input_len} stages={stage_count}"),
            Self::StageSkipped { index } => write!(f, "stage[{index}] skipped"),
            Self::StageFinished {
                index,
                name,
                input_len,
                output_len,
            } => write!(f, "stage[{index}] {name} rows={input_len}->{output_len}"),
            Self::RunFinished {
                output_len,
                stages_applied,
                stages_skipped,
                elapsed,
            } => write!(
                f,
                "run finished output_len={output_len} applied={stages_applied} skipped={stages_skipped} elapsed={elapsed:?}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::{CompositeObserver, PipelineEvent, PipelineObserver, StdErrPipelineObserver};

    #[derive(Default)]
    struct CountingObserver {
        seen: AtomicUsize,
    }

    impl PipelineObserver for CountingObserver {
        fn on_event(&self, _event: &PipelineEvent) {
            let _ = self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(CountingObserver::default());
        let b = Arc::new(CountingObserver::default());
        let observers: Vec<Arc<dyn PipelineObserver>> =
            vec![a.clone(), b.clone(), Arc::new(StdErrPipelineObserver)];
        let composite = CompositeObserver::new(observers);

        composite.on_event(&PipelineEvent::StageSkipped { index: 0 });
        composite.on_event(&PipelineEvent::InputRejected);

        assert_eq!(a.seen.load(Ordering::SeqCst), 2);
        assert_eq!(b.seen.load(Ordering::SeqCst), 2);
        assert_eq!(format!("{composite:?}"), "CompositeObserver { observers_len: 3 }");
    }

    #[test]
    fn events_display_compactly() {
        let finished = PipelineEvent::StageFinished {
            index: 2,
            name: "filter".to_string(),
            input_len: 10,
            output_len: 4,
        };
        assert_eq!(finished.to_string(), "stage[2] filter rows=10->4");

        let done = PipelineEvent::RunFinished {
            output_len: 4,
            stages_applied: 3,
            stages_skipped: 1,
            elapsed: Duration::from_millis(5),
        };
        assert!(done.to_string().starts_with("run finished output_len=4 applied=3 skipped=1"));
    }
}
