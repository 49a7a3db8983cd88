//! Left-to-right stage pipelines.
//!
//! [`run_pipeline`] folds a list of [`Stage`]s over a collection: the output of each stage is
//! the input of the next, and the last output is returned. It is total:
//!
//! - input that is not a [`Value::List`] yields an empty collection
//! - non-invocable stages (see [`Stage::is_invocable`]) are skipped as identity
//! - no stages at all returns the input contents unchanged
//!
//! [`Pipeline`] is the owned, reusable form of the same fold, with an optional
//! [`PipelineObserver`] for monitoring.
//!
//! ## Example
//!
//! ```rust
//! use record_pipeline::pipeline::{filter, run_pipeline, sort};
//! use record_pipeline::processing::{make_comparator, make_predicate};
//! use record_pipeline::types::{Record, Value};
//!
//! let data = Value::List(vec![
//!     Value::Record(Record::new().with("rating", 3)),
//!     Value::Record(Record::new().with("rating", 5)),
//!     Value::Record(Record::new().with("rating", 1)),
//! ]);
//!
//! let out = run_pipeline(
//!     &data,
//!     &[
//!         &filter(make_predicate("rating", ">=", 3)),
//!         &sort(make_comparator("rating", "desc")),
//!     ],
//! );
//! assert_eq!(
//!     out,
//!     vec![
//!         Value::Record(Record::new().with("rating", 5)),
//!         Value::Record(Record::new().with("rating", 3)),
//!     ]
//! );
//! ```

mod observer;
mod stage;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::types::{Collection, Value};

pub use observer::{CompositeObserver, PipelineEvent, PipelineObserver, StdErrPipelineObserver};
pub use stage::{Filter, FnStage, Map, Sort, Stage, filter, from_fn, map, sort};

/// Fold `stages` over `data`, left to right.
///
/// `data` is cloned once into the fold; the caller's value is never modified.
pub fn run_pipeline(data: &Value, stages: &[&dyn Stage]) -> Collection {
    fold_stages(data, stages.iter().copied(), None)
}

/// An owned, reusable sequence of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    observer: Option<Arc<dyn PipelineObserver>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append an already boxed stage.
    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Append a non-invocable slot. The runner skips it.
    pub fn skip(self) -> Self {
        self.stage(None::<Filter>)
    }

    /// Attach an observer for pipeline events.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Number of stage slots, skipped ones included.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name())
    }

    /// Run the pipeline over `data`. Same semantics as [`run_pipeline`].
    pub fn run(&self, data: &Value) -> Collection {
        fold_stages(data, self.stages.iter(), self.observer.as_deref())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

fn fold_stages<'a, I, S>(data: &Value, stages: I, observer: Option<&dyn PipelineObserver>) -> Collection
where
    I: ExactSizeIterator<Item = &'a S>,
    S: Stage + ?Sized + 'a,
{
    let emit = |event: PipelineEvent| {
        if let Some(obs) = observer {
            obs.on_event(&event);
        }
    };

    let Some(items) = data.as_list() else {
        warn!("pipeline input is not a list; returning an empty collection");
        emit(PipelineEvent::InputRejected);
        return Vec::new();
    };

    let start = Instant::now();
    let stage_count = stages.len();
    debug!(input_len = items.len(), stage_count, "pipeline run started");
    emit(PipelineEvent::RunStarted {
        input_len: items.len(),
        stage_count,
    });

    let mut result = items.to_vec();
    let mut applied = 0usize;
    let mut skipped = 0usize;
    for (index, stage) in stages.enumerate() {
        if !stage.is_invocable() {
            debug!(index, stage = stage.name(), "skipping non-invocable stage");
            skipped += 1;
            emit(PipelineEvent::StageSkipped { index });
            continue;
        }

        let input_len = result.len();
        result = stage.apply(result);
        applied += 1;
        trace!(
            index,
            stage = stage.name(),
            input_len,
            output_len = result.len(),
            "stage applied"
        );
        emit(PipelineEvent::StageFinished {
            index,
            name: stage.name().to_string(),
            input_len,
            output_len: result.len(),
        });
    }

    debug!(output_len = result.len(), applied, skipped, "pipeline run finished");
    emit(PipelineEvent::RunFinished {
        output_len: result.len(),
        stages_applied: applied,
        stages_skipped: skipped,
        elapsed: start.elapsed(),
    });
    result
}
