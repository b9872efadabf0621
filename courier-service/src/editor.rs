//! Validated graph mutations with cache invalidation.

use courier_cache::{CacheKey, KeyPrefix, Namespace};
use courier_core::{
    Amount, GraphStore, NewStep, Point, PointId, RouteBase, RouteBaseId, Step, StepId,
};
use log::debug;

use crate::validation::{ensure_distinct, resolve_point};
use crate::{RouteOrchestrator, ServiceError, ValidationError};

/// Changes to apply to a stored step.
///
/// Absent or blank descriptions keep the current endpoint, and a zero time or
/// cost keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepUpdate {
    /// Description of the new start point.
    pub start: Option<String>,
    /// Description of the new end point.
    pub end: Option<String>,
    /// New travel time.
    pub time: Amount,
    /// New cost.
    pub cost: Amount,
}

/// Changes to apply to a stored route base.
///
/// Absent or blank descriptions keep the current endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteBaseUpdate {
    /// Description of the new origin.
    pub origin: Option<String>,
    /// Description of the new destination.
    pub destination: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Creates, updates and deletes graph entities, keeping the orchestrator's
/// cache consistent.
///
/// Point and step changes can affect any path, so they invalidate every
/// cached result. Route base changes only invalidate the results for the
/// pairs involved.
#[derive(Debug)]
pub struct GraphEditor<'a, S> {
    orchestrator: &'a RouteOrchestrator<S>,
}

impl<'a, S> GraphEditor<'a, S>
where
    S: GraphStore,
{
    /// Edit the store behind `orchestrator`.
    #[must_use]
    pub const fn new(orchestrator: &'a RouteOrchestrator<S>) -> Self {
        Self { orchestrator }
    }

    const fn store(&self) -> &S {
        self.orchestrator.repository()
    }

    fn forget_all(&self) {
        let removed = self.orchestrator.cache().remove_by_prefix(&KeyPrefix::all());
        debug!("graph changed; dropped {removed} cached results");
    }

    fn forget_pair(&self, origin: PointId, destination: PointId) {
        for namespace in Namespace::ALL {
            let key = CacheKey::new(namespace, origin, destination);
            self.orchestrator
                .cache()
                .remove_by_prefix(&KeyPrefix::Key(key));
        }
    }

    /// Add a point.
    ///
    /// # Errors
    ///
    /// [`ValidationError::BlankDescription`] or
    /// [`ValidationError::DescriptionInUse`] for an unusable description;
    /// [`ServiceError::Repository`] when the store fails.
    pub fn create_point(&self, description: &str) -> Result<Point, ServiceError> {
        self.ensure_description_free(description, None)?;
        let point = self.store().insert_point(description)?;
        self.forget_all();
        Ok(point)
    }

    /// Rename a point.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PointMissing`] for an unknown id, otherwise as
    /// [`create_point`](Self::create_point).
    pub fn update_point(&self, id: PointId, description: &str) -> Result<Point, ServiceError> {
        let mut point = self.existing_point(id)?;
        self.ensure_description_free(description, Some(id))?;
        description.clone_into(&mut point.description);
        self.store().update_point(&point)?;
        self.forget_all();
        Ok(point)
    }

    /// Remove a point with its steps and route bases.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PointMissing`] for an unknown id;
    /// [`ServiceError::Repository`] when the store fails.
    pub fn delete_point(&self, id: PointId) -> Result<(), ServiceError> {
        self.existing_point(id)?;
        self.store().delete_point(id)?;
        self.forget_all();
        Ok(())
    }

    /// Add a step between two points named by description.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EqualPoints`], [`ValidationError::PointNotFound`],
    /// [`ValidationError::StepExists`] or [`ValidationError::NonPositiveAmount`]
    /// for an invalid step; [`ServiceError::Repository`] when the store fails.
    pub fn create_step(
        &self,
        start: &str,
        end: &str,
        time: Amount,
        cost: Amount,
    ) -> Result<Step, ServiceError> {
        ensure_distinct(start, end)?;
        let start_point = resolve_point(self.store(), start)?;
        let end_point = resolve_point(self.store(), end)?;
        self.ensure_no_step(start_point.id, end_point.id, None)?;
        if time.is_zero() || cost.is_zero() {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let step = self.store().insert_step(NewStep {
            start: start_point.id,
            end: end_point.id,
            time,
            cost,
        })?;
        self.forget_all();
        Ok(step)
    }

    /// Change a step's endpoints or weights.
    ///
    /// # Errors
    ///
    /// [`ValidationError::StepMissing`] for an unknown id, otherwise as
    /// [`create_step`](Self::create_step) apart from the positivity check.
    pub fn update_step(&self, id: StepId, update: &StepUpdate) -> Result<Step, ServiceError> {
        let mut step = self
            .store()
            .step(id)?
            .ok_or(ValidationError::StepMissing { id })?;
        if let Some(start) = non_blank(update.start.as_deref()) {
            step.start = resolve_point(self.store(), start)?.id;
        }
        if let Some(end) = non_blank(update.end.as_deref()) {
            step.end = resolve_point(self.store(), end)?.id;
        }
        if step.start == step.end {
            return Err(ValidationError::EqualPoints.into());
        }
        self.ensure_no_step(step.start, step.end, Some(id))?;
        if !update.time.is_zero() {
            step.time = update.time;
        }
        if !update.cost.is_zero() {
            step.cost = update.cost;
        }
        self.store().update_step(&step)?;
        self.forget_all();
        Ok(step)
    }

    /// Remove a step.
    ///
    /// # Errors
    ///
    /// [`ValidationError::StepMissing`] for an unknown id;
    /// [`ServiceError::Repository`] when the store fails.
    pub fn delete_step(&self, id: StepId) -> Result<(), ServiceError> {
        if self.store().step(id)?.is_none() {
            return Err(ValidationError::StepMissing { id }.into());
        }
        self.store().delete_step(id)?;
        self.forget_all();
        Ok(())
    }

    /// Declare a route base between two points named by description.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EqualPoints`], [`ValidationError::PointNotFound`] or
    /// [`ValidationError::RouteBaseExists`] for an invalid pair;
    /// [`ServiceError::Repository`] when the store fails.
    pub fn create_route_base(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteBase, ServiceError> {
        ensure_distinct(origin, destination)?;
        let origin_point = resolve_point(self.store(), origin)?;
        let destination_point = resolve_point(self.store(), destination)?;
        self.ensure_no_route_base(origin_point.id, destination_point.id)?;
        let route_base = self
            .store()
            .insert_route_base(origin_point.id, destination_point.id)?;
        self.forget_pair(route_base.origin, route_base.destination);
        Ok(route_base)
    }

    /// Move a route base to a different pair of points.
    ///
    /// Cached results for both the old and the new pair are dropped.
    ///
    /// # Errors
    ///
    /// [`ValidationError::RouteBaseMissing`] for an unknown id, otherwise as
    /// [`create_route_base`](Self::create_route_base).
    pub fn update_route_base(
        &self,
        id: RouteBaseId,
        update: &RouteBaseUpdate,
    ) -> Result<RouteBase, ServiceError> {
        let previous = self.existing_route_base(id)?;
        let mut route_base = previous;
        if let Some(origin) = non_blank(update.origin.as_deref()) {
            route_base.origin = resolve_point(self.store(), origin)?.id;
        }
        if let Some(destination) = non_blank(update.destination.as_deref()) {
            route_base.destination = resolve_point(self.store(), destination)?.id;
        }
        if route_base.origin == route_base.destination {
            return Err(ValidationError::EqualPoints.into());
        }
        if route_base != previous {
            self.ensure_no_route_base(route_base.origin, route_base.destination)?;
        }
        self.store().update_route_base(&route_base)?;
        self.forget_pair(previous.origin, previous.destination);
        self.forget_pair(route_base.origin, route_base.destination);
        Ok(route_base)
    }

    /// Remove a route base.
    ///
    /// # Errors
    ///
    /// [`ValidationError::RouteBaseMissing`] for an unknown id;
    /// [`ServiceError::Repository`] when the store fails.
    pub fn delete_route_base(&self, id: RouteBaseId) -> Result<(), ServiceError> {
        let route_base = self.existing_route_base(id)?;
        self.store().delete_route_base(id)?;
        self.forget_pair(route_base.origin, route_base.destination);
        Ok(())
    }

    fn existing_point(&self, id: PointId) -> Result<Point, ServiceError> {
        self.store()
            .point(id)?
            .ok_or_else(|| ValidationError::PointMissing { id }.into())
    }

    fn existing_route_base(&self, id: RouteBaseId) -> Result<RouteBase, ServiceError> {
        self.store()
            .route_base(id)?
            .ok_or_else(|| ValidationError::RouteBaseMissing { id }.into())
    }

    fn ensure_description_free(
        &self,
        description: &str,
        owner: Option<PointId>,
    ) -> Result<(), ServiceError> {
        if description.trim().is_empty() {
            return Err(ValidationError::BlankDescription.into());
        }
        match self.store().point_by_description(description)? {
            Some(point) if Some(point.id) != owner => Err(ValidationError::DescriptionInUse {
                description: description.to_owned(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn ensure_no_step(
        &self,
        start: PointId,
        end: PointId,
        updating: Option<StepId>,
    ) -> Result<(), ServiceError> {
        match self.store().step_between(start, end)? {
            Some(step) if Some(step.id) != updating => {
                Err(ValidationError::StepExists { start, end }.into())
            }
            _ => Ok(()),
        }
    }

    fn ensure_no_route_base(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<(), ServiceError> {
        if self
            .store()
            .route_base_between(origin, destination)?
            .is_some()
        {
            return Err(ValidationError::RouteBaseExists {
                origin,
                destination,
            }
            .into());
        }
        Ok(())
    }
}
