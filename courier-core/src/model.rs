//! Graph entities and path results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Point`].
    PointId
);
entity_id!(
    /// Identifier of a [`Step`].
    StepId
);
entity_id!(
    /// Identifier of a [`RouteBase`].
    RouteBaseId
);

/// A location in the delivery graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Unique identifier.
    pub id: PointId,
    /// Human-readable label, unique across points.
    pub description: String,
}

impl Point {
    /// Construct a point.
    pub fn new(id: impl Into<PointId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// The scalar used to rank paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Metric {
    /// Total cost of the path.
    Cost,
    /// Total travel time of the path.
    Time,
}

impl Metric {
    /// Lowercase name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Time => "time",
        }
    }

    /// The metric that is not `self`.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Cost => Self::Time,
            Self::Time => Self::Cost,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a metric name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric {0:?}; expected \"cost\" or \"time\"")]
pub struct MetricParseError(pub String);

impl FromStr for Metric {
    type Err = MetricParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Self::Cost),
            "time" => Ok(Self::Time),
            _ => Err(MetricParseError(raw.to_owned())),
        }
    }
}

/// A directed, weighted link between two points.
///
/// # Examples
///
/// ```
/// use courier_core::{Amount, Metric, Step};
///
/// let step = Step::new(1, 1, 3, Amount::from_units(1), Amount::from_units(20));
/// assert_eq!(step.weight(Metric::Cost), Amount::from_units(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Unique identifier.
    pub id: StepId,
    /// Point the step leaves from.
    pub start: PointId,
    /// Point the step arrives at.
    pub end: PointId,
    /// Travel time along the step.
    pub time: Amount,
    /// Cost of taking the step.
    pub cost: Amount,
}

impl Step {
    /// Construct a step.
    pub fn new(
        id: impl Into<StepId>,
        start: impl Into<PointId>,
        end: impl Into<PointId>,
        time: Amount,
        cost: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            time,
            cost,
        }
    }

    /// The step's weight under `metric`.
    #[must_use]
    pub const fn weight(&self, metric: Metric) -> Amount {
        match metric {
            Metric::Cost => self.cost,
            Metric::Time => self.time,
        }
    }
}

/// A declared origin/destination pair for which path queries are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteBase {
    /// Unique identifier.
    pub id: RouteBaseId,
    /// Start of the route.
    pub origin: PointId,
    /// End of the route.
    pub destination: PointId,
}

impl RouteBase {
    /// Construct a route base.
    pub fn new(
        id: impl Into<RouteBaseId>,
        origin: impl Into<PointId>,
        destination: impl Into<PointId>,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// One simple path with its aggregated cost and time.
///
/// Steps are contiguous: each step starts where the previous one ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepsCollection {
    /// Steps in travel order.
    pub steps: Vec<Step>,
    /// Sum of the steps' costs.
    pub total_cost: Amount,
    /// Sum of the steps' times.
    pub total_time: Amount,
}

impl StepsCollection {
    /// Build a collection and compute its totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use courier_core::{Amount, Step, StepsCollection};
    ///
    /// let path = StepsCollection::from_steps(vec![
    ///     Step::new(1, 1, 3, Amount::from_units(1), Amount::from_units(20)),
    ///     Step::new(4, 3, 2, Amount::from_units(1), Amount::from_units(12)),
    /// ]);
    /// assert_eq!(path.total_cost, Amount::from_units(32));
    /// assert_eq!(path.total_time, Amount::from_units(2));
    /// ```
    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Self {
        let total_cost = steps.iter().map(|step| step.cost).sum();
        let total_time = steps.iter().map(|step| step.time).sum();
        Self {
            steps,
            total_cost,
            total_time,
        }
    }

    /// The path's total under `metric`.
    #[must_use]
    pub const fn total(&self, metric: Metric) -> Amount {
        match metric {
            Metric::Cost => self.total_cost,
            Metric::Time => self.total_time,
        }
    }

    /// Compare two paths for selection under `metric`.
    ///
    /// Paths order by their `metric` total, then by the other metric's total,
    /// then by their step identifiers. [`Ordering::Less`] means `self` is the
    /// better path. The order is total, so the best path does not depend on
    /// the order paths were found in.
    #[must_use]
    pub fn rank(&self, other: &Self, metric: Metric) -> Ordering {
        self.total(metric)
            .cmp(&other.total(metric))
            .then_with(|| self.total(metric.other()).cmp(&other.total(metric.other())))
            .then_with(|| {
                self.steps
                    .iter()
                    .map(|step| step.id)
                    .cmp(other.steps.iter().map(|step| step.id))
            })
    }

    /// Points visited in order, starting with the first step's start.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.steps
            .first()
            .map(|step| step.start)
            .into_iter()
            .chain(self.steps.iter().map(|step| step.end))
    }

    /// Number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Every simple path found between an origin and a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Start of every path.
    pub origin: PointId,
    /// End of every path.
    pub destination: PointId,
    /// The paths, in discovery order.
    pub paths: Vec<StepsCollection>,
}

impl Route {
    /// Construct a route from its paths.
    #[must_use]
    pub const fn new(origin: PointId, destination: PointId, paths: Vec<StepsCollection>) -> Self {
        Self {
            origin,
            destination,
            paths,
        }
    }

    /// Construct a route with no paths.
    #[must_use]
    pub const fn empty(origin: PointId, destination: PointId) -> Self {
        Self::new(origin, destination, Vec::new())
    }

    /// The path with the smallest total under `metric`.
    ///
    /// Ties resolve through [`StepsCollection::rank`].
    #[must_use]
    pub fn best_by(&self, metric: Metric) -> Option<&StepsCollection> {
        self.paths.iter().min_by(|left, right| left.rank(right, metric))
    }
}
