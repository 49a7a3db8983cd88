//! The [`Stage`] trait and the built-in stage adapters.

use std::fmt;

use crate::processing::{Comparator, Predicate, Projector};
use crate::types::{Collection, Value};

/// A transformation from one collection to another.
///
/// Stages receive their input by value, so they cannot reach the caller's original data.
pub trait Stage {
    /// Transform `input` into the next collection.
    fn apply(&self, input: Collection) -> Collection;

    /// Display name used in logs and observer events.
    fn name(&self) -> &str;

    /// Whether the runner should call [`Self::apply`] at all.
    ///
    /// A non-invocable stage is skipped and treated as identity.
    fn is_invocable(&self) -> bool {
        true
    }
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    fn apply(&self, input: Collection) -> Collection {
        (**self).apply(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_invocable(&self) -> bool {
        (**self).is_invocable()
    }
}

/// `None` is a non-invocable slot.
impl<S: Stage> Stage for Option<S> {
    fn apply(&self, input: Collection) -> Collection {
        match self {
            Some(stage) => stage.apply(input),
            None => input,
        }
    }

    fn name(&self) -> &str {
        match self {
            Some(stage) => stage.name(),
            None => "none",
        }
    }

    fn is_invocable(&self) -> bool {
        self.as_ref().is_some_and(Stage::is_invocable)
    }
}

/// Keeps items matching a [`Predicate`], preserving order.
#[derive(Debug, Clone)]
pub struct Filter {
    predicate: Predicate,
}

/// Wrap a [`Predicate`] into a filtering stage.
pub fn filter(predicate: Predicate) -> Filter {
    Filter { predicate }
}

impl Stage for Filter {
    fn apply(&self, input: Collection) -> Collection {
        input
            .into_iter()
            .filter(|item| self.predicate.test(item))
            .collect()
    }

    fn name(&self) -> &str {
        "filter"
    }
}

/// Stable sort by a [`Comparator`].
#[derive(Debug, Clone)]
pub struct Sort {
    comparator: Comparator,
}

/// Wrap a [`Comparator`] into a sorting stage.
pub fn sort(comparator: Comparator) -> Sort {
    Sort { comparator }
}

impl Stage for Sort {
    fn apply(&self, mut input: Collection) -> Collection {
        input.sort_by(|a, b| self.comparator.compare(a, b));
        input
    }

    fn name(&self) -> &str {
        "sort"
    }
}

/// Replaces every item with its projection.
#[derive(Debug, Clone)]
pub struct Map {
    projector: Projector,
}

/// Wrap a [`Projector`] into a mapping stage.
pub fn map(projector: Projector) -> Map {
    Map { projector }
}

impl Stage for Map {
    fn apply(&self, input: Collection) -> Collection {
        input
            .into_iter()
            .map(|item| Value::Record(self.projector.project_owned(item)))
            .collect()
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// A named stage backed by an arbitrary function.
pub struct FnStage<F> {
    name: String,
    f: F,
}

/// Wrap a plain function or closure into a stage.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnStage<F>
where
    F: Fn(Collection) -> Collection,
{
    FnStage {
        name: name.into(),
        f,
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(Collection) -> Collection,
{
    fn apply(&self, input: Collection) -> Collection {
        (self.f)(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnStage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Stage, filter, from_fn, map, sort};
    use crate::processing::{make_comparator, make_predicate, make_projector};
    use crate::types::{Collection, Record, Value};

    fn sample() -> Collection {
        vec![
            Value::Record(Record::new().with("name", "Amrik").with("rating", 4)),
            Value::Null,
            Value::Record(Record::new().with("name", "Zaika").with("rating", 2)),
            Value::Record(Record::new().with("name", "Haveli").with("rating", 5)),
        ]
    }

    #[test]
    fn filter_drops_non_matching_and_non_records() {
        let out = filter(make_predicate("rating", ">", 3)).apply(sample());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].field("name"), Some(&Value::from("Amrik")));
        assert_eq!(out[1].field("name"), Some(&Value::from("Haveli")));
    }

    #[test]
    fn sort_orders_by_field() {
        let records: Collection = sample().into_iter().filter(|v| v.as_record().is_some()).collect();
        let out = sort(make_comparator("name", "asc")).apply(records);
        assert_eq!(out.len(), 3);
        let names: Vec<_> = out.iter().filter_map(|v| v.field("name")).collect();
        assert_eq!(
            names,
            vec![&Value::from("Amrik"), &Value::from("Haveli"), &Value::from("Zaika")]
        );
    }

    #[test]
    fn sort_puts_non_records_last() {
        let out = sort(make_comparator("rating", "asc")).apply(sample());
        let ratings: Vec<_> = out.iter().map(|v| v.field("rating")).collect();
        assert_eq!(
            ratings,
            vec![Some(&Value::Int64(2)), Some(&Value::Int64(4)), Some(&Value::Int64(5)), None]
        );
    }

    #[test]
    fn map_projects_each_item() {
        let out = map(make_projector(["rating"])).apply(sample());
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], Value::Record(Record::new().with("rating", 4)));
        // non-records become empty records
        assert_eq!(out[1], Value::Record(Record::new()));
    }

    #[test]
    fn map_consumes_items_with_the_same_result() {
        let projector = make_projector(["name", "rating"]);
        let borrowed: Collection = sample()
            .iter()
            .map(|item| Value::Record(projector.project(item)))
            .collect();
        assert_eq!(map(projector).apply(sample()), borrowed);
    }

    #[test]
    fn option_slots() {
        let none: Option<super::Filter> = None;
        assert!(!none.is_invocable());
        assert_eq!(none.apply(sample()), sample());

        let some = Some(filter(make_predicate("rating", "<", 3)));
        assert!(some.is_invocable());
        assert_eq!(some.apply(sample()).len(), 1);
    }

    #[test]
    fn fn_stage_wraps_closures() {
        let take_two = from_fn("take_two", |c: Collection| c.into_iter().take(2).collect());
        assert_eq!(take_two.name(), "take_two");
        assert_eq!(take_two.apply(sample()).len(), 2);
    }
}
